use std::collections::BTreeSet;

use super::Context;
use crate::{Error, Result};
use rollcall_engine::{RegistrationDraft, RegistrationWizard, WizardStep};
use rollcall_types::{ClassId, Student};

pub struct StudentOps {
    ctx: Context,
}

impl StudentOps {
    pub(crate) fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Students of a class; an unknown class has none
    pub fn list(&self, class_id: &ClassId) -> Result<Vec<Student>> {
        match self.ctx.backend.list_students(class_id) {
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Roll numbers already in use, for the academic step
    pub fn taken_roll_numbers(&self, class_id: &ClassId) -> Result<BTreeSet<u32>> {
        Ok(self.list(class_id)?.iter().map(|s| s.roll_number).collect())
    }

    /// Next free roll number in a class
    pub fn next_roll_number(&self, class_id: &ClassId) -> Result<u32> {
        Ok(self
            .taken_roll_numbers(class_id)?
            .last()
            .map_or(1, |n| n + 1))
    }

    /// Walk every wizard step with `draft`, then enroll the student
    pub fn register(&self, draft: RegistrationDraft) -> Result<Student> {
        let class_id: ClassId = draft.class_id.parse()?;
        let mut wizard = RegistrationWizard::new(self.taken_roll_numbers(&class_id)?);
        *wizard.draft_mut() = draft;
        while wizard.step() != WizardStep::Review {
            wizard.next().map_err(Error::Validation)?;
        }
        let student = wizard.submit().map_err(Error::Validation)?;

        self.ctx.backend.add_student(&student)?;
        self.ctx.audit(
            "student.create",
            format!("student/{}", student.id),
            format!(
                "{} enrolled in {} as #{}",
                student.display_name(),
                student.class_id,
                student.roll_number
            ),
        );
        Ok(student)
    }
}

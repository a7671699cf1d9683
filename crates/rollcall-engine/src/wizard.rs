//! Multi-step student registration.
//!
//! Steps: Personal -> Guardian -> Academic -> Review. Moving forward validates
//! the current step; moving back never does. Submitting re-checks everything.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use rollcall_types::{ClassId, Guardian, Student, StudentId};
use serde::Serialize;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Personal,
    Guardian,
    Academic,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Personal,
        WizardStep::Guardian,
        WizardStep::Academic,
        WizardStep::Review,
    ];

    fn next(self) -> Self {
        match self {
            WizardStep::Personal => WizardStep::Guardian,
            WizardStep::Guardian => WizardStep::Academic,
            WizardStep::Academic | WizardStep::Review => WizardStep::Review,
        }
    }

    fn prev(self) -> Self {
        match self {
            WizardStep::Personal | WizardStep::Guardian => WizardStep::Personal,
            WizardStep::Academic => WizardStep::Guardian,
            WizardStep::Review => WizardStep::Academic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Form values as typed by the user
#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub class_id: String,
    pub roll_number: Option<u32>,
}

pub struct RegistrationWizard {
    step: WizardStep,
    draft: RegistrationDraft,
    /// Roll numbers already used in the target class
    taken_roll_numbers: BTreeSet<u32>,
}

impl RegistrationWizard {
    pub fn new(taken_roll_numbers: BTreeSet<u32>) -> Self {
        Self {
            step: WizardStep::Personal,
            draft: RegistrationDraft::default(),
            taken_roll_numbers,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    /// Advance when the current step is valid; otherwise stay and report.
    pub fn next(&mut self) -> Result<WizardStep, Vec<FieldError>> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    pub fn validate_step(&self, step: WizardStep) -> Vec<FieldError> {
        let d = &self.draft;
        let mut errors = Vec::new();
        match step {
            WizardStep::Personal => {
                if d.first_name.trim().is_empty() {
                    errors.push(FieldError::new("first_name", "First name is required"));
                }
                if d.last_name.trim().is_empty() {
                    errors.push(FieldError::new("last_name", "Last name is required"));
                }
                if d.date_of_birth.is_some_and(|dob| dob > Utc::now().date_naive()) {
                    errors.push(FieldError::new(
                        "date_of_birth",
                        "Date of birth cannot be in the future",
                    ));
                }
            }
            WizardStep::Guardian => {
                if d.guardian_name.trim().is_empty() {
                    errors.push(FieldError::new("guardian_name", "Guardian name is required"));
                }
                if !is_valid_phone(&d.guardian_phone) {
                    errors.push(FieldError::new(
                        "guardian_phone",
                        "Phone must have 7 to 15 digits",
                    ));
                }
                if let Some(email) = d.guardian_email.as_deref()
                    && !email.trim().is_empty()
                    && !EMAIL_REGEX.is_match(email.trim())
                {
                    errors.push(FieldError::new("guardian_email", "Email address is invalid"));
                }
            }
            WizardStep::Academic => {
                if d.class_id.parse::<ClassId>().is_err() {
                    errors.push(FieldError::new("class_id", "Class is required"));
                }
                match d.roll_number {
                    None | Some(0) => {
                        errors.push(FieldError::new(
                            "roll_number",
                            "Roll number must be a positive number",
                        ));
                    }
                    Some(n) if self.taken_roll_numbers.contains(&n) => {
                        errors.push(FieldError::new(
                            "roll_number",
                            format!("Roll number {} is already taken", n),
                        ));
                    }
                    Some(_) => {}
                }
            }
            WizardStep::Review => {}
        }
        errors
    }

    /// Build the student. Only allowed from the review step.
    pub fn submit(self) -> Result<Student, Vec<FieldError>> {
        if self.step != WizardStep::Review {
            return Err(vec![FieldError::new(
                "step",
                "Complete all steps before submitting",
            )]);
        }
        let errors: Vec<FieldError> = WizardStep::ALL
            .iter()
            .flat_map(|&s| self.validate_step(s))
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let d = self.draft;
        let (Ok(class_id), Some(roll_number)) = (d.class_id.parse::<ClassId>(), d.roll_number)
        else {
            return Err(vec![FieldError::new("class_id", "Class is required")]);
        };
        Ok(Student {
            id: StudentId::generate(),
            class_id,
            roll_number,
            first_name: d.first_name.trim().to_string(),
            last_name: d.last_name.trim().to_string(),
            date_of_birth: d.date_of_birth,
            guardian: Guardian {
                name: d.guardian_name.trim().to_string(),
                phone: d.guardian_phone.trim().to_string(),
                email: d
                    .guardian_email
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty()),
            },
            enrolled_at: Utc::now(),
        })
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if !PHONE_REGEX.is_match(phone) {
        return false;
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(taken: &[u32]) -> RegistrationWizard {
        let mut w = RegistrationWizard::new(taken.iter().copied().collect());
        let d = w.draft_mut();
        d.first_name = "Ada".into();
        d.last_name = "Lovelace".into();
        d.guardian_name = "Anne Byron".into();
        d.guardian_phone = "+44 20-7946-0958".into();
        d.guardian_email = Some("anne@example.org".into());
        d.class_id = "7b".into();
        d.roll_number = Some(12);
        w
    }

    #[test]
    fn test_next_blocks_on_invalid_step() {
        let mut w = RegistrationWizard::new(BTreeSet::new());
        let errors = w.next().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(w.step(), WizardStep::Personal);
    }

    #[test]
    fn test_full_walk_and_submit() {
        let mut w = filled(&[1, 2, 3]);
        assert_eq!(w.next(), Ok(WizardStep::Guardian));
        assert_eq!(w.next(), Ok(WizardStep::Academic));
        assert_eq!(w.next(), Ok(WizardStep::Review));
        let student = w.submit().unwrap();
        assert_eq!(student.display_name(), "Ada Lovelace");
        assert_eq!(student.class_id.as_str(), "7b");
        assert_eq!(student.guardian.email.as_deref(), Some("anne@example.org"));
    }

    #[test]
    fn test_back_never_validates() {
        let mut w = filled(&[]);
        w.next().unwrap();
        w.draft_mut().guardian_phone.clear();
        assert_eq!(w.back(), WizardStep::Personal);
        assert_eq!(w.back(), WizardStep::Personal);
    }

    #[test]
    fn test_submit_requires_review_step() {
        let w = filled(&[]);
        assert!(w.submit().is_err());
    }

    #[test]
    fn test_duplicate_roll_number() {
        let mut w = filled(&[12]);
        w.next().unwrap();
        w.next().unwrap();
        let errors = w.next().unwrap_err();
        assert_eq!(errors[0].field, "roll_number");
    }

    #[test]
    fn test_phone_and_email_rules() {
        assert!(is_valid_phone("5551234"));
        assert!(is_valid_phone("+1 555-123-4567"));
        assert!(!is_valid_phone("555"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("1234567890123456"));

        let mut w = filled(&[]);
        w.draft_mut().guardian_email = Some("not-an-email".into());
        w.next().unwrap();
        let errors = w.next().unwrap_err();
        assert_eq!(errors[0].field, "guardian_email");
    }
}

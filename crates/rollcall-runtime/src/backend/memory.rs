use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{AttendanceBackend, builtin_roles, roster_from};
use crate::{Error, Result};
use rollcall_types::{
    AttendanceDate, AttendanceStatus, AuditRecord, ClassId, Role, RosterEntry, SaveReceipt,
    Student, StudentId,
};

#[derive(Default)]
struct State {
    students: BTreeMap<ClassId, Vec<Student>>,
    sheets: BTreeMap<(ClassId, AttendanceDate), BTreeMap<StudentId, AttendanceStatus>>,
    audit: Vec<AuditRecord>,
    roles: Vec<Role>,
    saves: usize,
}

/// In-process backend. `fail_saves(true)` makes every save return an error.
pub struct MemoryBackend {
    state: Mutex<State>,
    fail_saves: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                roles: builtin_roles(),
                ..State::default()
            }),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Result<Self> {
        let backend = Self::new();
        for student in students {
            backend.add_student(&student)?;
        }
        Ok(backend)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.state().map(|s| s.saves).unwrap_or_default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| Error::Backend("memory backend lock poisoned".to_string()))
    }
}

impl AttendanceBackend for MemoryBackend {
    fn list_classes(&self) -> Result<Vec<ClassId>> {
        Ok(self.state()?.students.keys().cloned().collect())
    }

    fn list_students(&self, class_id: &ClassId) -> Result<Vec<Student>> {
        self.state()?
            .students
            .get(class_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("class '{}'", class_id)))
    }

    fn add_student(&self, student: &Student) -> Result<()> {
        let mut state = self.state()?;
        let class = state.students.entry(student.class_id.clone()).or_default();
        if class.iter().any(|s| s.roll_number == student.roll_number) {
            return Err(Error::InvalidOperation(format!(
                "roll number {} is already taken in class '{}'",
                student.roll_number, student.class_id
            )));
        }
        class.push(student.clone());
        class.sort_by_key(|s| s.roll_number);
        Ok(())
    }

    fn fetch_roster(&self, class_id: &ClassId, date: AttendanceDate) -> Result<Vec<RosterEntry>> {
        let state = self.state()?;
        let students = state
            .students
            .get(class_id)
            .ok_or_else(|| Error::NotFound(format!("class '{}'", class_id)))?;
        let empty = BTreeMap::new();
        let statuses = state
            .sheets
            .get(&(class_id.clone(), date))
            .unwrap_or(&empty);
        Ok(roster_from(students, statuses))
    }

    fn save_roster(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        entries: &[RosterEntry],
    ) -> Result<SaveReceipt> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Backend("simulated save failure".to_string()));
        }
        let mut state = self.state()?;
        if !state.students.contains_key(class_id) {
            return Err(Error::NotFound(format!("class '{}'", class_id)));
        }
        state.sheets.insert(
            (class_id.clone(), date),
            entries.iter().map(|e| (e.id.clone(), e.status)).collect(),
        );
        state.saves += 1;
        Ok(SaveReceipt {
            success: true,
            message: format!("Saved {} entries for {} on {}", entries.len(), class_id, date),
        })
    }

    fn audit_log(&self) -> Result<Vec<AuditRecord>> {
        Ok(self.state()?.audit.clone())
    }

    fn append_audit(&self, record: &AuditRecord) -> Result<()> {
        self.state()?.audit.push(record.clone());
        Ok(())
    }

    fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.state()?.roles.clone())
    }

    fn save_role(&self, role: &Role) -> Result<()> {
        let mut state = self.state()?;
        match state.roles.iter_mut().find(|r| r.id == role.id) {
            Some(existing) => *existing = role.clone(),
            None => state.roles.push(role.clone()),
        }
        Ok(())
    }

    fn delete_role(&self, role_id: &str) -> Result<()> {
        let mut state = self.state()?;
        let Some(pos) = state.roles.iter().position(|r| r.id == role_id) else {
            return Err(Error::NotFound(format!("role '{}'", role_id)));
        };
        if state.roles[pos].system {
            return Err(Error::InvalidOperation(format!(
                "role '{}' is built in and cannot be deleted",
                role_id
            )));
        }
        state.roles.remove(pos);
        Ok(())
    }
}

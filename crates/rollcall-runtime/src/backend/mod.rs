//! Collaborators that own persistent attendance data.
//!
//! The UI never talks to storage directly: it hands a [`SaveRequest`] snapshot
//! to a backend (usually through the save worker) and receives a [`SaveReceipt`].
//!
//! [`SaveRequest`]: rollcall_engine::SaveRequest

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::collections::BTreeMap;

use crate::Result;
use rollcall_engine::AttendanceSummary;
use rollcall_types::{
    Action, AttendanceDate, AttendanceStatus, AuditRecord, ClassId, Module, Permission, Role,
    RosterEntry, SaveReceipt, Student, StudentId,
};

pub trait AttendanceBackend: Send + Sync {
    fn list_classes(&self) -> Result<Vec<ClassId>>;

    /// Students enrolled in a class, ordered by roll number
    fn list_students(&self, class_id: &ClassId) -> Result<Vec<Student>>;

    fn add_student(&self, student: &Student) -> Result<()>;

    /// Roster for one day. Students with no stored status come back present.
    fn fetch_roster(&self, class_id: &ClassId, date: AttendanceDate) -> Result<Vec<RosterEntry>>;

    fn save_roster(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        entries: &[RosterEntry],
    ) -> Result<SaveReceipt>;

    /// Full audit trail in insertion order
    fn audit_log(&self) -> Result<Vec<AuditRecord>>;

    fn append_audit(&self, record: &AuditRecord) -> Result<()>;

    fn list_roles(&self) -> Result<Vec<Role>>;

    /// Insert or replace by role id
    fn save_role(&self, role: &Role) -> Result<()>;

    /// Refuses system roles
    fn delete_role(&self, role_id: &str) -> Result<()>;
}

/// Roles every workspace starts with
pub fn builtin_roles() -> Vec<Role> {
    let mut admin = Role::new("admin", "Administrator");
    admin.description = "Full access to every module".to_string();
    admin.system = true;
    admin.permissions = Module::ALL
        .iter()
        .flat_map(|&m| Action::ALL.iter().map(move |&a| Permission::new(m, a)))
        .collect();

    let mut teacher = Role::new("teacher", "Teacher");
    teacher.description = "Takes attendance for assigned classes".to_string();
    teacher.permissions = [
        Permission::new(Module::Attendance, Action::View),
        Permission::new(Module::Attendance, Action::Create),
        Permission::new(Module::Attendance, Action::Edit),
        Permission::new(Module::Students, Action::View),
        Permission::new(Module::Classes, Action::View),
    ]
    .into_iter()
    .collect();

    vec![admin, teacher]
}

pub(crate) fn summarize(entries: &[RosterEntry]) -> String {
    let summary = AttendanceSummary::of(entries);
    format!(
        "{} present, {} absent, {} leave",
        summary.present, summary.absent, summary.leave
    )
}

/// Merge the enrolled students with a stored day sheet
pub(crate) fn roster_from(
    students: &[Student],
    statuses: &BTreeMap<StudentId, AttendanceStatus>,
) -> Vec<RosterEntry> {
    students
        .iter()
        .map(|s| {
            let entry = s.to_roster_entry();
            match statuses.get(&s.id) {
                Some(&status) => entry.with_status(status),
                None => entry,
            }
        })
        .collect()
}

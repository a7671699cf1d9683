use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{AttendanceBackend, builtin_roles, roster_from};
use crate::{Error, Result};
use rollcall_types::{
    AttendanceDate, AttendanceStatus, AuditRecord, ClassId, Role, RosterEntry, SaveReceipt,
    Student, StudentId,
};

/// Stored attendance for one class and day
#[derive(Debug, Serialize, Deserialize)]
struct DaySheet {
    class_id: ClassId,
    date: AttendanceDate,
    saved_at: DateTime<Utc>,
    statuses: BTreeMap<StudentId, AttendanceStatus>,
}

/// JSON files under a data directory:
///
/// ```text
/// <root>/classes/<class>/students.json
/// <root>/classes/<class>/attendance/<YYYY-MM-DD>.json
/// <root>/roles.json
/// <root>/audit.jsonl
/// ```
pub struct FileBackend {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn class_dir(&self, class_id: &ClassId) -> PathBuf {
        self.root.join("classes").join(class_id.as_str())
    }

    fn students_path(&self, class_id: &ClassId) -> PathBuf {
        self.class_dir(class_id).join("students.json")
    }

    fn sheet_path(&self, class_id: &ClassId, date: AttendanceDate) -> PathBuf {
        self.class_dir(class_id)
            .join("attendance")
            .join(format!("{}.json", date))
    }

    fn roles_path(&self) -> PathBuf {
        self.root.join("roles.json")
    }

    fn audit_path(&self) -> PathBuf {
        self.root.join("audit.jsonl")
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::Backend("storage lock poisoned".to_string()))
    }

    fn require_class(&self, class_id: &ClassId) -> Result<Vec<Student>> {
        let path = self.students_path(class_id);
        if !path.exists() {
            return Err(Error::NotFound(format!("class '{}'", class_id)));
        }
        let mut students: Vec<Student> = read_json(&path)?;
        students.sort_by_key(|s| s.roll_number);
        Ok(students)
    }

    fn load_roles(&self) -> Result<Vec<Role>> {
        let path = self.roles_path();
        if !path.exists() {
            return Ok(builtin_roles());
        }
        read_json(&path)
    }
}

impl AttendanceBackend for FileBackend {
    fn list_classes(&self) -> Result<Vec<ClassId>> {
        let dir = self.root.join("classes");
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut classes = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_string_lossy().parse::<ClassId>() {
                Ok(id) => classes.push(id),
                Err(err) => tracing::warn!(%err, "skipping unexpected class directory"),
            }
        }
        classes.sort();
        Ok(classes)
    }

    fn list_students(&self, class_id: &ClassId) -> Result<Vec<Student>> {
        self.require_class(class_id)
    }

    fn add_student(&self, student: &Student) -> Result<()> {
        let _guard = self.lock()?;
        let path = self.students_path(&student.class_id);
        let mut students: Vec<Student> = if path.exists() {
            read_json(&path)?
        } else {
            Vec::new()
        };
        if students.iter().any(|s| s.roll_number == student.roll_number) {
            return Err(Error::InvalidOperation(format!(
                "roll number {} is already taken in class '{}'",
                student.roll_number, student.class_id
            )));
        }
        if students.iter().any(|s| s.id == student.id) {
            return Err(Error::InvalidOperation(format!(
                "student '{}' already exists",
                student.id
            )));
        }
        students.push(student.clone());
        students.sort_by_key(|s| s.roll_number);
        write_json(&path, &students)?;
        tracing::info!(class = %student.class_id, student = %student.id, "student added");
        Ok(())
    }

    fn fetch_roster(&self, class_id: &ClassId, date: AttendanceDate) -> Result<Vec<RosterEntry>> {
        let students = self.require_class(class_id)?;
        let path = self.sheet_path(class_id, date);
        let statuses = if path.exists() {
            read_json::<DaySheet>(&path)?.statuses
        } else {
            BTreeMap::new()
        };
        tracing::debug!(class = %class_id, %date, stored = statuses.len(), "roster fetched");
        Ok(roster_from(&students, &statuses))
    }

    fn save_roster(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        entries: &[RosterEntry],
    ) -> Result<SaveReceipt> {
        let _guard = self.lock()?;
        let students = self.require_class(class_id)?;
        if let Some(stranger) = entries
            .iter()
            .find(|e| !students.iter().any(|s| s.id == e.id))
        {
            return Ok(SaveReceipt {
                success: false,
                message: format!("'{}' is not enrolled in class '{}'", stranger.name, class_id),
            });
        }

        let sheet = DaySheet {
            class_id: class_id.clone(),
            date,
            saved_at: Utc::now(),
            statuses: entries.iter().map(|e| (e.id.clone(), e.status)).collect(),
        };
        write_json(&self.sheet_path(class_id, date), &sheet)?;
        Ok(SaveReceipt {
            success: true,
            message: format!("Saved {} entries for {} on {}", entries.len(), class_id, date),
        })
    }

    fn audit_log(&self) -> Result<Vec<AuditRecord>> {
        let path = self.audit_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(fs::File::open(&path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    fn append_audit(&self, record: &AuditRecord) -> Result<()> {
        let _guard = self.lock()?;
        fs::create_dir_all(&self.root)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.audit_path())?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn list_roles(&self) -> Result<Vec<Role>> {
        self.load_roles()
    }

    fn save_role(&self, role: &Role) -> Result<()> {
        let _guard = self.lock()?;
        let mut roles = self.load_roles()?;
        match roles.iter_mut().find(|r| r.id == role.id) {
            Some(existing) => *existing = role.clone(),
            None => roles.push(role.clone()),
        }
        write_json(&self.roles_path(), &roles)
    }

    fn delete_role(&self, role_id: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut roles = self.load_roles()?;
        let Some(pos) = roles.iter().position(|r| r.id == role_id) else {
            return Err(Error::NotFound(format!("role '{}'", role_id)));
        };
        if roles[pos].system {
            return Err(Error::InvalidOperation(format!(
                "role '{}' is built in and cannot be deleted",
                role_id
            )));
        }
        roles.remove(pos);
        write_json(&self.roles_path(), &roles)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write through a sibling temp file so readers never see a partial document
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_types::Guardian;
    use tempfile::TempDir;

    fn student(class: &str, id: &str, roll: u32, first: &str) -> Student {
        Student {
            id: StudentId::new(id),
            class_id: ClassId::new(class),
            roll_number: roll,
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            date_of_birth: None,
            guardian: Guardian {
                name: "Guardian".to_string(),
                phone: "5551234".to_string(),
                email: None,
            },
            enrolled_at: Utc::now(),
        }
    }

    fn date() -> AttendanceDate {
        "2024-09-02".parse().unwrap()
    }

    #[test]
    fn test_unrecorded_day_defaults_to_present() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.add_student(&student("7b", "s2", 2, "Bo"))?;
        backend.add_student(&student("7b", "s1", 1, "Al"))?;

        let roster = backend.fetch_roster(&ClassId::new("7b"), date())?;
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].roll_number, 1);
        assert!(roster.iter().all(|e| e.status == AttendanceStatus::Present));
        Ok(())
    }

    #[test]
    fn test_save_then_fetch() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.add_student(&student("7b", "s1", 1, "Al"))?;
        let class = ClassId::new("7b");

        let mut roster = backend.fetch_roster(&class, date())?;
        roster[0].status = AttendanceStatus::Leave;
        let receipt = backend.save_roster(&class, date(), &roster)?;
        assert!(receipt.success);

        let again = backend.fetch_roster(&class, date())?;
        assert_eq!(again[0].status, AttendanceStatus::Leave);
        let other_day = backend.fetch_roster(&class, "2024-09-03".parse().unwrap())?;
        assert_eq!(other_day[0].status, AttendanceStatus::Present);
        Ok(())
    }

    #[test]
    fn test_save_rejects_unenrolled_entries() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.add_student(&student("7b", "s1", 1, "Al"))?;

        let stranger = RosterEntry::new(StudentId::new("ghost"), 9, "Ghost");
        let receipt = backend.save_roster(&ClassId::new("7b"), date(), &[stranger])?;
        assert!(!receipt.success);
        Ok(())
    }

    #[test]
    fn test_unknown_class_is_not_found() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        let err = backend.fetch_roster(&ClassId::new("nope"), date()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        Ok(())
    }

    #[test]
    fn test_duplicate_roll_number_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.add_student(&student("7b", "s1", 1, "Al"))?;
        let err = backend.add_student(&student("7b", "s2", 1, "Bo")).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        Ok(())
    }

    #[test]
    fn test_list_classes_sorted() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.add_student(&student("8a", "s1", 1, "Al"))?;
        backend.add_student(&student("7b", "s2", 1, "Bo"))?;
        assert_eq!(
            backend.list_classes()?,
            vec![ClassId::new("7b"), ClassId::new("8a")]
        );
        Ok(())
    }

    #[test]
    fn test_audit_appends_lines() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        backend.append_audit(&AuditRecord::new("ms.k", "attendance.save", "class/7b", ""))?;
        backend.append_audit(&AuditRecord::new("ms.k", "role.grant", "role/teacher", ""))?;
        let log = backend.audit_log()?;
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].action, "role.grant");
        Ok(())
    }

    #[test]
    fn test_roles_default_and_system_guard() -> Result<()> {
        let dir = TempDir::new()?;
        let backend = FileBackend::new(dir.path());
        let roles = backend.list_roles()?;
        assert!(roles.iter().any(|r| r.id == "admin" && r.system));

        let err = backend.delete_role("admin").unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));

        backend.save_role(&Role::new("clerk", "Clerk"))?;
        assert_eq!(backend.list_roles()?.len(), 3);
        backend.delete_role("clerk")?;
        assert!(!backend.list_roles()?.iter().any(|r| r.id == "clerk"));
        Ok(())
    }
}

use serde::Serialize;
use std::fmt;

use crate::presentation::formatters::truncate;

#[derive(Debug, Serialize)]
pub struct StudentListViewModel {
    pub class_id: String,
    pub students: Vec<StudentRowViewModel>,
}

#[derive(Debug, Serialize)]
pub struct StudentRowViewModel {
    pub id: String,
    pub roll_number: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub guardian_name: String,
    pub guardian_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
}

impl fmt::Display for StudentListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.students.is_empty() {
            return writeln!(f, "No students enrolled in class {}.", self.class_id);
        }
        writeln!(
            f,
            "{:>4}  {:<26} {:<22} {:<16} EMAIL",
            "ROLL", "NAME", "GUARDIAN", "PHONE"
        )?;
        writeln!(f, "{}", "-".repeat(96))?;
        for s in &self.students {
            writeln!(
                f,
                "{:>4}  {:<26} {:<22} {:<16} {}",
                s.roll_number,
                truncate(&s.name, 26),
                truncate(&s.guardian_name, 22),
                s.guardian_phone,
                s.guardian_email.as_deref().unwrap_or("-")
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{} students in class {}", self.students.len(), self.class_id)
    }
}

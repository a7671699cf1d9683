use chrono::{Duration, NaiveDate, Utc};

use crate::Result;
use crate::backend::AttendanceBackend;
use rollcall_types::{ClassId, Guardian, Student, StudentId};

const DEMO_NAMES: [(&str, &str); 24] = [
    ("Amara", "Okafor"),
    ("Ben", "Hartley"),
    ("Chloe", "Nguyen"),
    ("Dev", "Patel"),
    ("Elif", "Yilmaz"),
    ("Finn", "O'Brien"),
    ("Grace", "Kim"),
    ("Hugo", "Martin"),
    ("Isla", "Campbell"),
    ("Jonah", "Weiss"),
    ("Keira", "Mensah"),
    ("Liam", "Rossi"),
    ("Maya", "Fernandes"),
    ("Noah", "Schmidt"),
    ("Olivia", "Brown"),
    ("Pavel", "Novak"),
    ("Quinn", "Murphy"),
    ("Rosa", "Garcia"),
    ("Sami", "Haddad"),
    ("Tara", "Singh"),
    ("Umar", "Farouk"),
    ("Vera", "Ivanova"),
    ("Wes", "Carter"),
    ("Yuki", "Tanaka"),
];

/// A deterministic sample class
pub fn demo_students(class_id: &ClassId) -> Vec<Student> {
    let base = NaiveDate::from_ymd_opt(2013, 1, 15);
    DEMO_NAMES
        .iter()
        .enumerate()
        .map(|(i, (first, last))| {
            let roll = i as u32 + 1;
            let email = (i % 3 != 0).then(|| {
                format!("{}.{}@example.org", first, last)
                    .to_lowercase()
                    .replace('\'', "")
            });
            Student {
                id: StudentId::new(format!("{}-{:03}", class_id, roll)),
                class_id: class_id.clone(),
                roll_number: roll,
                first_name: first.to_string(),
                last_name: last.to_string(),
                date_of_birth: base.map(|d| d + Duration::days(i as i64 * 17)),
                guardian: Guardian {
                    name: format!("Parent of {}", first),
                    phone: format!("+1 555-01{:02}", roll),
                    email,
                },
                enrolled_at: Utc::now(),
            }
        })
        .collect()
}

/// Enroll the sample class unless it already has students. Returns how many were added.
pub fn seed(backend: &dyn AttendanceBackend, class_id: &ClassId) -> Result<usize> {
    if backend.list_classes()?.contains(class_id) {
        tracing::info!(class = %class_id, "demo class already present");
        return Ok(0);
    }
    let students = demo_students(class_id);
    for student in &students {
        backend.add_student(student)?;
    }
    tracing::info!(class = %class_id, count = students.len(), "demo class seeded");
    Ok(students.len())
}

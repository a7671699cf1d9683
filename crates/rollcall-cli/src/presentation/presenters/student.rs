use rollcall_types::{ClassId, Student};

use crate::presentation::view_models::{StudentListViewModel, StudentRowViewModel};

pub fn present_student_list(class_id: &ClassId, students: &[Student]) -> StudentListViewModel {
    StudentListViewModel {
        class_id: class_id.to_string(),
        students: students
            .iter()
            .map(|s| StudentRowViewModel {
                id: s.id.to_string(),
                roll_number: s.roll_number,
                name: s.display_name(),
                date_of_birth: s.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
                guardian_name: s.guardian.name.clone(),
                guardian_phone: s.guardian.phone.clone(),
                guardian_email: s.guardian.email.clone(),
            })
            .collect(),
    }
}

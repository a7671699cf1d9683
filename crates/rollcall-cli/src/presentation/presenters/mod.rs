pub mod audit;
pub mod role;
pub mod roster;
pub mod screen;
pub mod student;

pub use audit::present_audit_list;
pub use role::{present_role_list, present_role_matrix};
pub use roster::{present_roster, present_summary};
pub use screen::present_screen;
pub use student::present_student_list;

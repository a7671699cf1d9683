pub mod attendance;
pub mod audit;
pub mod rbac;
pub mod student;

pub use attendance::*;
pub use audit::*;
pub use rbac::*;
pub use student::*;

pub mod audit;
pub mod common;
pub mod config;
pub mod message;
pub mod result;
pub mod role;
pub mod roster;
pub mod screen;
pub mod student;

pub use audit::{AuditEntryViewModel, AuditListViewModel};
pub use common::{Guidance, StatusBadge, StatusLevel};
pub use config::ConfigViewModel;
pub use message::MessageViewModel;
pub use result::CommandResultViewModel;
pub use role::{
    MatrixRowViewModel, RoleListViewModel, RoleMatrixViewModel, RoleSummaryViewModel,
};
pub use roster::{RosterRowViewModel, RosterViewModel, SummaryViewModel};
pub use screen::{
    AttendanceScreenViewModel, CardViewModel, HeaderViewModel, ModalViewModel,
    NoticeViewModel, StatusBarViewModel,
};
pub use student::{StudentListViewModel, StudentRowViewModel};

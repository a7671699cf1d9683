// Engine module - pure attendance and admin logic (no I/O)
// Sits between the domain types and the CLI / TUI presentation

pub mod audit;
pub mod batch;
pub mod export;
pub mod layout;
pub mod navigation;
pub mod notification;
pub mod permissions;
pub mod roster;
pub mod screen;
pub mod status_cycle;
pub mod wizard;

pub use audit::AuditQuery;
pub use batch::{BatchAction, BatchLedger, SaveGate};
pub use export::{ExportKind, export_file_name, roster_to_csv, roster_to_json};
pub use layout::{ViewMode, cells_to_px, columns_for_width, columns_per_row};
pub use navigation::{
    FocusTargets, GridMetrics, Key, KeyContext, KeyOutcome, KeyTarget, NavCommand, Navigator,
    scroll_nearest,
};
pub use notification::{Notification, NotificationEcho, NotificationKind};
pub use permissions::{PermissionMatrix, Selection};
pub use roster::{AttendanceSummary, Roster, RosterFilter, RosterView, SortDirection, SortKey};
pub use screen::{AttendanceScreen, Modal, SaveRequest, ScreenEffect, ScreenSettings};
pub use status_cycle::next_status;
pub use wizard::{FieldError, RegistrationDraft, RegistrationWizard, WizardStep};

//! Ratatui widgets for the attendance screen.
//!
//! Each widget is a thin wrapper around a view model reference. Layout
//! (which card goes in which rectangle) is decided by the renderer, which also
//! keeps the rectangles for mouse hit-testing.

pub mod card;
pub mod header;
pub mod modal;
pub mod status_bar;
pub mod table;

pub use card::CardView;
pub use header::HeaderView;
pub use modal::ModalView;
pub use status_bar::StatusBarView;
pub use table::TableView;

use crate::presentation::view_models::StatusLevel;
use ratatui::style::Color;
use rollcall_types::AttendanceStatus;

pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

pub(crate) fn status_color(status: AttendanceStatus) -> Color {
    match status {
        AttendanceStatus::Present => Color::Green,
        AttendanceStatus::Absent => Color::Red,
        AttendanceStatus::Leave => Color::Yellow,
    }
}

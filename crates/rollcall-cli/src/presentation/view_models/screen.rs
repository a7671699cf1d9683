use serde::Serialize;

use super::common::StatusLevel;
use super::roster::SummaryViewModel;
use rollcall_types::AttendanceStatus;

/// Everything the attendance screen draws in one frame
#[derive(Debug, Serialize)]
pub struct AttendanceScreenViewModel {
    pub header: HeaderViewModel,
    pub cards: Vec<CardViewModel>,
    pub columns: usize,
    pub table: bool,
    pub status_bar: StatusBarViewModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalViewModel>,
}

#[derive(Debug, Serialize)]
pub struct HeaderViewModel {
    pub title: String,
    pub view_label: String,
    pub sort_label: String,
    pub filter_label: String,
    pub search_query: String,
    pub searching: bool,
    pub dirty: bool,
    pub saving: bool,
    pub summary: SummaryViewModel,
}

#[derive(Debug, Serialize)]
pub struct CardViewModel {
    pub position: usize,
    pub roll_number: u32,
    pub name: String,
    pub status: AttendanceStatus,
    pub focused: bool,
    pub is_online: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusBarViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeViewModel>,
    pub focus_label: String,
}

#[derive(Debug, Serialize)]
pub struct NoticeViewModel {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalViewModel {
    Help { bindings: Vec<(String, String)> },
    MarkAll {
        choice: Option<AttendanceStatus>,
        total: usize,
    },
}

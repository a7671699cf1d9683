use chrono::{DateTime, Local, Utc};
use owo_colors::{OwoColorize, Stream};
use rollcall_types::AttendanceStatus;

/// Status word colored for stdout when stdout supports it
pub fn status_word(status: AttendanceStatus) -> String {
    let word = format!("{:<7}", status.label());
    match status {
        AttendanceStatus::Present => word
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        AttendanceStatus::Absent => word
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
        AttendanceStatus::Leave => word
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
    }
}

pub fn heading(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}

pub fn dim(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed())
        .to_string()
}

pub fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Cut to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

use rollcall_engine::{AttendanceSummary, RosterFilter};
use rollcall_types::{AttendanceDate, ClassId, RosterEntry};

use crate::presentation::view_models::{RosterRowViewModel, RosterViewModel, SummaryViewModel};

pub fn present_summary(summary: AttendanceSummary) -> SummaryViewModel {
    SummaryViewModel {
        total: summary.total,
        present: summary.present,
        absent: summary.absent,
        leave: summary.leave,
        rate_percent: (summary.rate_percent * 10.0).round() / 10.0,
    }
}

fn describe_filter(filter: &RosterFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(status) = filter.status {
        parts.push(format!("status = {}", status));
    }
    if !filter.query.trim().is_empty() {
        parts.push(format!("search = \"{}\"", filter.query.trim()));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// `rows` are in display order; the summary covers the whole roster
pub fn present_roster(
    class_id: &ClassId,
    date: AttendanceDate,
    rows: &[RosterEntry],
    whole_roster: AttendanceSummary,
    filter: &RosterFilter,
) -> RosterViewModel {
    RosterViewModel {
        class_id: class_id.to_string(),
        date: date.to_string(),
        summary: present_summary(whole_roster),
        rows: rows
            .iter()
            .enumerate()
            .map(|(position, e)| RosterRowViewModel {
                position,
                id: e.id.to_string(),
                roll_number: e.roll_number,
                name: e.name.clone(),
                status: e.status,
                is_online: e.is_online,
            })
            .collect(),
        filter: describe_filter(filter),
    }
}

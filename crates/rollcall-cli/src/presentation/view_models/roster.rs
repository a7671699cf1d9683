use serde::Serialize;
use std::fmt;

use crate::presentation::formatters::{dim, heading, status_word, truncate};
use rollcall_types::AttendanceStatus;

#[derive(Debug, Serialize)]
pub struct RosterViewModel {
    pub class_id: String,
    pub date: String,
    pub summary: SummaryViewModel,
    /// Display order; `position` is the index in this list
    pub rows: Vec<RosterRowViewModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryViewModel {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub rate_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct RosterRowViewModel {
    pub position: usize,
    pub id: String,
    pub roll_number: u32,
    pub name: String,
    pub status: AttendanceStatus,
    pub is_online: bool,
}

impl fmt::Display for SummaryViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} students: {} present, {} absent, {} leave ({:.1}% attendance)",
            self.total, self.present, self.absent, self.leave, self.rate_percent
        )
    }
}

impl fmt::Display for RosterViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            heading(&format!("Class {} on {}", self.class_id, self.date))
        )?;
        if let Some(filter) = &self.filter {
            writeln!(f, "{}", dim(&format!("filter: {}", filter)))?;
        }
        writeln!(f)?;

        if self.rows.is_empty() {
            writeln!(f, "No students match.")?;
        } else {
            writeln!(f, "{:>4}  {:<30} {:<7}", "ROLL", "NAME", "STATUS")?;
            writeln!(f, "{}", "-".repeat(44))?;
            for row in &self.rows {
                writeln!(
                    f,
                    "{:>4}  {:<30} {}",
                    row.roll_number,
                    truncate(&row.name, 30),
                    status_word(row.status)
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", self.summary)
    }
}

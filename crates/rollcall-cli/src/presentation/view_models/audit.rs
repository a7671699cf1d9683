use serde::Serialize;
use std::fmt;

use crate::presentation::formatters::{dim, truncate};

#[derive(Debug, Serialize)]
pub struct AuditListViewModel {
    pub entries: Vec<AuditEntryViewModel>,
    pub total_matching: usize,
}

#[derive(Debug, Serialize)]
pub struct AuditEntryViewModel {
    pub id: String,
    pub at: String,
    /// Local wall-clock form of `at`
    #[serde(skip)]
    pub at_local: String,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub details: String,
}

impl fmt::Display for AuditListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No audit records match.");
        }

        writeln!(
            f,
            "{:<16}  {:<12} {:<20} {:<28} DETAILS",
            "WHEN", "ACTOR", "ACTION", "RESOURCE"
        )?;
        writeln!(f, "{}", "-".repeat(100))?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<16}  {:<12} {:<20} {:<28} {}",
                entry.at_local,
                truncate(&entry.actor, 12),
                truncate(&entry.action, 20),
                truncate(&entry.resource, 28),
                entry.details
            )?;
        }
        if self.total_matching > self.entries.len() {
            writeln!(
                f,
                "{}",
                dim(&format!(
                    "showing {} of {} (raise --limit for more)",
                    self.entries.len(),
                    self.total_matching
                ))
            )?;
        }
        Ok(())
    }
}

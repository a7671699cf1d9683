use rollcall_types::{AttendanceStatus, StudentId};

use crate::roster::Roster;

/// Record of the last "mark all" so it can be undone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAction {
    pub status: AttendanceStatus,
    pub previous: Vec<(StudentId, AttendanceStatus)>,
}

/// Applies a status to every roster entry and remembers a single undo step.
#[derive(Debug, Clone, Default)]
pub struct BatchLedger {
    last: Option<BatchAction>,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&BatchAction> {
        self.last.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.last.is_some()
    }

    /// Set every entry (filtered or not) to `status`. Returns how many changed.
    pub fn mark_all(&mut self, roster: &mut Roster, status: AttendanceStatus) -> usize {
        let previous: Vec<(StudentId, AttendanceStatus)> = roster
            .entries()
            .iter()
            .map(|e| (e.id.clone(), e.status))
            .collect();

        let mut changed = 0;
        for (id, before) in &previous {
            if *before != status {
                roster.set_status(id, status);
                changed += 1;
            }
        }

        self.last = Some(BatchAction { status, previous });
        changed
    }

    /// Restore the statuses recorded by the last batch. False when there is none.
    pub fn undo(&mut self, roster: &mut Roster) -> bool {
        let Some(action) = self.last.take() else {
            return false;
        };
        for (id, status) in &action.previous {
            roster.set_status(id, *status);
        }
        true
    }

    /// Forget the undo step (e.g. after the roster was reloaded)
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Allows one save at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveGate {
    in_flight: bool,
}

impl SaveGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. False while another save is still running.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

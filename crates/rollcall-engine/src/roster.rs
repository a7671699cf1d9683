use std::cmp::Ordering;

use rollcall_types::{AttendanceStatus, RosterEntry, StudentId};
use serde::{Deserialize, Serialize};

use crate::status_cycle::next_status;

/// In-memory attendance sheet for one class and day
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    dirty: bool,
    /// Bumped on every status change
    revision: u64,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self {
            entries,
            dirty: false,
            revision: 0,
        }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &StudentId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Replace the sheet with freshly fetched data
    pub fn replace(&mut self, entries: Vec<RosterEntry>) {
        self.entries = entries;
        self.dirty = false;
        self.revision += 1;
    }

    /// Assign `status`; returns the previous status when the entry exists.
    pub fn set_status(
        &mut self,
        id: &StudentId,
        status: AttendanceStatus,
    ) -> Option<AttendanceStatus> {
        let entry = self.entries.iter_mut().find(|e| &e.id == id)?;
        let previous = entry.status;
        if previous != status {
            entry.status = status;
            self.dirty = true;
            self.revision += 1;
        }
        Some(previous)
    }

    /// Advance along the status rotation; returns the new status.
    pub fn cycle_status(&mut self, id: &StudentId) -> Option<AttendanceStatus> {
        let current = self.get(id)?.status;
        let next = next_status(current);
        self.set_status(id, next);
        Some(next)
    }

    /// Unsaved changes since the last load or successful save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Mark clean after a save of `revision`, unless edits happened since.
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.dirty = false;
        }
        !self.dirty
    }

    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary::of(&self.entries)
    }
}

/// Counts over the full roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    /// Present share, 0 when the roster is empty
    pub rate_percent: f64,
}

impl AttendanceSummary {
    pub fn of<'a>(entries: impl IntoIterator<Item = &'a RosterEntry>) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            summary.total += 1;
            match entry.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Leave => summary.leave += 1,
            }
        }
        if summary.total > 0 {
            summary.rate_percent = summary.present as f64 * 100.0 / summary.total as f64;
        }
        summary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Case-insensitive match against name or roll number
    pub query: String,
    pub status: Option<AttendanceStatus>,
}

impl RosterFilter {
    pub fn matches(&self, entry: &RosterEntry) -> bool {
        if let Some(status) = self.status
            && entry.status != status
        {
            return false;
        }
        let query = self.query.trim();
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        entry.name.to_lowercase().contains(&query) || entry.roll_number.to_string() == query
    }

    /// Step the status filter: all -> present -> absent -> leave -> all
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(AttendanceStatus::Present),
            Some(AttendanceStatus::Present) => Some(AttendanceStatus::Absent),
            Some(AttendanceStatus::Absent) => Some(AttendanceStatus::Leave),
            Some(AttendanceStatus::Leave) => None,
        };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    RollNumber,
    Name,
    Status,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::RollNumber => SortKey::Name,
            SortKey::Name => SortKey::Status,
            SortKey::Status => SortKey::RollNumber,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::RollNumber => "roll no",
            SortKey::Name => "name",
            SortKey::Status => "status",
        }
    }

    fn compare(&self, a: &RosterEntry, b: &RosterEntry) -> Ordering {
        match self {
            SortKey::RollNumber => a.roll_number.cmp(&b.roll_number),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Status => a.status.cmp(&b.status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Filtered, sorted projection of a roster.
///
/// A display position is an index into `order`; positions are contiguous
/// `0..len()` and only valid until the next rebuild.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    pub filter: RosterFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
    order: Vec<usize>,
    ids: Vec<StudentId>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the visible order. Returns true when the visible id sequence changed.
    pub fn rebuild(&mut self, roster: &Roster) -> bool {
        let entries = roster.entries();
        let mut order: Vec<usize> = (0..entries.len())
            .filter(|&i| self.filter.matches(&entries[i]))
            .collect();
        // stable sort; ties keep roster order
        order.sort_by(|&a, &b| {
            let ord = self.sort.compare(&entries[a], &entries[b]);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let ids: Vec<StudentId> = order.iter().map(|&i| entries[i].id.clone()).collect();
        let changed = ids != self.ids;
        self.order = order;
        self.ids = ids;
        changed
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn id_at(&self, position: usize) -> Option<&StudentId> {
        self.ids.get(position)
    }

    pub fn entry_at<'a>(&self, roster: &'a Roster, position: usize) -> Option<&'a RosterEntry> {
        self.order
            .get(position)
            .and_then(|&i| roster.entries().get(i))
    }

    pub fn position_of(&self, id: &StudentId) -> Option<usize> {
        self.ids.iter().position(|v| v == id)
    }

    /// Visible entries in display order
    pub fn entries<'a>(
        &'a self,
        roster: &'a Roster,
    ) -> impl Iterator<Item = &'a RosterEntry> + 'a {
        self.order.iter().filter_map(|&i| roster.entries().get(i))
    }
}

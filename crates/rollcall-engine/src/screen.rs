//! Attendance page state.
//!
//! Owns the roster, its filtered view and the focus state, and routes every key
//! through one entry point. The navigation core sees the key first (with the
//! current text-input / modal context); whatever it does not handle falls
//! through to page-level shortcuts.

use std::time::{Duration, Instant};

use rollcall_types::{
    AttendanceDate, AttendanceStatus, ClassId, RosterEntry, SaveReceipt, StudentId,
};

use crate::batch::{BatchLedger, SaveGate};
use crate::layout::{self, ViewMode};
use crate::navigation::{GridMetrics, Key, KeyContext, NavCommand, Navigator};
use crate::notification::{
    DEFAULT_NOTIFICATION_TTL, Notification, NotificationEcho, NotificationKind,
};
use crate::roster::{AttendanceSummary, Roster, RosterView};

#[derive(Debug, Clone, Copy)]
pub struct ScreenSettings {
    pub view_mode: ViewMode,
    pub notification_ttl: Duration,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Grid,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// Dialog surface currently covering the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Help,
    /// Mark-all confirmation; `choice` is picked with p / a / l
    MarkAll { choice: Option<AttendanceStatus> },
}

/// Snapshot handed to the save collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub class_id: ClassId,
    pub date: AttendanceDate,
    pub entries: Vec<RosterEntry>,
    pub revision: u64,
}

/// Work the host must do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEffect {
    None,
    Quit,
    Save(SaveRequest),
    /// Fetch the day again and hand the result to [`AttendanceScreen::load`]
    Reload,
}

/// Destructive key waiting for a second press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Armed {
    Quit,
    Reload,
}

pub struct AttendanceScreen {
    class_id: ClassId,
    date: AttendanceDate,
    roster: Roster,
    view: RosterView,
    mode: ViewMode,
    viewport_px: u32,
    nav: Navigator,
    echo: NotificationEcho,
    batch: BatchLedger,
    save_gate: SaveGate,
    searching: bool,
    modal: Option<Modal>,
    armed: Option<Armed>,
}

impl AttendanceScreen {
    pub fn new(
        class_id: ClassId,
        date: AttendanceDate,
        entries: Vec<RosterEntry>,
        settings: ScreenSettings,
    ) -> Self {
        let mut screen = Self {
            class_id,
            date,
            roster: Roster::new(entries),
            view: RosterView::new(),
            mode: settings.view_mode,
            viewport_px: 0,
            nav: Navigator::new(),
            echo: NotificationEcho::new(settings.notification_ttl),
            batch: BatchLedger::new(),
            save_gate: SaveGate::new(),
            searching: false,
            modal: None,
            armed: None,
        };
        screen.refresh_view();
        screen
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn date(&self) -> AttendanceDate {
        self.date
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn view(&self) -> &RosterView {
        &self.view
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn focused(&self) -> Option<usize> {
        self.nav.focused()
    }

    pub fn focused_index(&self) -> i64 {
        self.nav.focused_index()
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn search_query(&self) -> &str {
        &self.view.filter.query
    }

    pub fn is_saving(&self) -> bool {
        self.save_gate.is_in_flight()
    }

    pub fn can_undo(&self) -> bool {
        self.batch.can_undo()
    }

    pub fn summary(&self) -> AttendanceSummary {
        self.roster.summary()
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.echo.visible(now)
    }

    /// Visible entries in display order
    pub fn visible_entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.view.entries(&self.roster)
    }

    /// Column count used for vertical navigation
    pub fn columns(&self) -> usize {
        layout::columns_per_row(self.mode, self.viewport_px)
    }

    /// Feed the current viewport width (re-evaluated on every resize)
    pub fn set_viewport_width_px(&mut self, px: u32) {
        self.viewport_px = px;
    }

    pub fn key_context(&self) -> KeyContext {
        if self.modal.is_some() {
            KeyContext::modal()
        } else if self.searching {
            KeyContext::text_input()
        } else {
            KeyContext::default()
        }
    }

    fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.view.len(), self.columns())
    }

    /// Outcome of a fetch started by [`ScreenEffect::Reload`].
    ///
    /// Fresh entries replace the roster and drop the undo record; on failure
    /// the local roster is kept.
    pub fn load(&mut self, result: Result<Vec<RosterEntry>, String>, now: Instant) {
        match result {
            Ok(entries) => {
                self.roster.replace(entries);
                self.batch.clear();
                self.refresh_view();
                let message = format!("Reloaded {} students", self.roster.len());
                self.echo.notify(NotificationKind::Info, Some(message), now);
            }
            Err(err) => {
                let message = format!("Reload failed: {}", err);
                self.echo.notify(NotificationKind::Error, Some(message), now);
            }
        }
    }

    /// Rebuild the visible order. Focus resets whenever the visible id
    /// sequence changed, so a focused index never points past the new view.
    fn refresh_view(&mut self) {
        if self.view.rebuild(&self.roster) {
            self.nav.reset();
        }
        self.nav.revalidate(self.view.len());
    }

    /// Rebuild after a status edit on `id`. Focus follows the entry to its new
    /// position and resets only when the entry left the view.
    fn refresh_view_following(&mut self, id: &StudentId) {
        if self.view.rebuild(&self.roster) {
            match self.view.position_of(id) {
                Some(position) => {
                    self.nav.focus(position, self.view.len());
                }
                None => self.nav.reset(),
            }
        }
        self.nav.revalidate(self.view.len());
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> ScreenEffect {
        self.echo.tick(now);

        let outcome = self.nav.handle_key(key, self.key_context(), self.metrics());
        if outcome.handled {
            self.armed = None;
            if let Some(command) = outcome.command {
                self.apply(command, now);
            }
            return ScreenEffect::None;
        }

        if let Some(modal) = self.modal {
            self.handle_modal_key(modal, key, now);
            return ScreenEffect::None;
        }
        if self.searching {
            self.handle_search_key(key);
            return ScreenEffect::None;
        }
        self.handle_page_key(key, now)
    }

    /// Pointer click on the element at `position`
    pub fn click(&mut self, position: usize) {
        if self.modal.is_some() {
            return;
        }
        self.searching = false;
        self.nav.focus(position, self.view.len());
    }

    fn apply(&mut self, command: NavCommand, now: Instant) {
        match command {
            NavCommand::Focus(position) => {
                let message = self
                    .view
                    .entry_at(&self.roster, position)
                    .map(|e| format!("{} (#{})", e.name, e.roll_number));
                self.echo.notify(NotificationKind::Navigate, message, now);
            }
            NavCommand::Select(position) => {
                let Some(id) = self.view.id_at(position).cloned() else {
                    return;
                };
                if let Some(status) = self.roster.cycle_status(&id) {
                    let name = self.roster.get(&id).map(|e| e.name.as_str()).unwrap_or_default();
                    let message = format!("{} marked {} (Enter)", name, status.label());
                    self.echo.notify(NotificationKind::Cycle, Some(message), now);
                }
                self.refresh_view_following(&id);
            }
            NavCommand::SetStatus { index, status } => {
                let Some(id) = self.view.id_at(index).cloned() else {
                    return;
                };
                if self.roster.set_status(&id, status).is_some() {
                    self.echo.notify(status.into(), None, now);
                }
                self.refresh_view_following(&id);
            }
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, key: Key, now: Instant) {
        match modal {
            Modal::Help => {
                if matches!(key, Key::Esc | Key::Enter | Key::Char('?') | Key::Char('q')) {
                    self.modal = None;
                }
            }
            Modal::MarkAll { choice } => match key {
                Key::Esc | Key::Char('n') | Key::Char('N') => self.modal = None,
                Key::Char(c) if AttendanceStatus::from_shortcut(c).is_some() => {
                    self.modal = Some(Modal::MarkAll {
                        choice: AttendanceStatus::from_shortcut(c),
                    });
                }
                Key::Enter | Key::Char('y') | Key::Char('Y') => {
                    if let Some(status) = choice {
                        self.modal = None;
                        self.mark_all(status, now);
                    }
                }
                _ => {}
            },
        }
    }

    fn handle_search_key(&mut self, key: Key) {
        match key {
            Key::Esc | Key::Enter => self.searching = false,
            Key::Backspace => {
                self.view.filter.query.pop();
                self.refresh_view();
            }
            Key::Char(c) => {
                self.view.filter.query.push(c);
                self.refresh_view();
            }
            Key::Space => {
                self.view.filter.query.push(' ');
                self.refresh_view();
            }
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: Key, now: Instant) -> ScreenEffect {
        if !matches!(key, Key::Char('q') | Key::Ctrl('r')) {
            self.armed = None;
        }

        match key {
            Key::Tab => {
                let n = self.view.len();
                if n > 0 {
                    let next = self.nav.focused().map_or(0, |i| (i + 1).min(n - 1));
                    self.nav.focus(next, n);
                }
            }
            Key::BackTab => {
                let n = self.view.len();
                if n > 0 {
                    let prev = self.nav.focused().map_or(0, |i| i.saturating_sub(1));
                    self.nav.focus(prev, n);
                }
            }
            Key::Char('/') => self.searching = true,
            Key::Char('v') => {
                self.mode = self.mode.toggled();
                self.nav.reset();
                let message = format!("Switched to {} view", self.mode.label());
                self.echo.notify(NotificationKind::Info, Some(message), now);
            }
            Key::Char('s') => {
                self.view.sort = self.view.sort.next();
                self.refresh_view();
                let message = format!("Sorted by {}", self.view.sort.label());
                self.echo.notify(NotificationKind::Info, Some(message), now);
            }
            Key::Char('r') => {
                self.view.direction = self.view.direction.reversed();
                self.refresh_view();
            }
            Key::Char('f') => {
                self.view.filter.cycle_status();
                self.refresh_view();
                let label = self.view.filter.status.map_or("all", |s| s.label());
                let message = format!("Showing: {}", label);
                self.echo.notify(NotificationKind::Info, Some(message), now);
            }
            Key::Char('m') => self.modal = Some(Modal::MarkAll { choice: None }),
            Key::Char('u') => {
                self.undo_batch(now);
            }
            Key::Char('?') => self.modal = Some(Modal::Help),
            Key::Ctrl('s') => return self.request_save(now),
            Key::Ctrl('r') => return self.request_reload(now),
            Key::Ctrl('c') => return ScreenEffect::Quit,
            Key::Esc if !self.view.filter.query.is_empty() => {
                self.view.filter.query.clear();
                self.refresh_view();
            }
            Key::Char('q') => {
                if self.confirm_discard(Armed::Quit, "q again to quit", now) {
                    return ScreenEffect::Quit;
                }
            }
            _ => {}
        }
        ScreenEffect::None
    }

    /// True when `action` may go ahead. A dirty roster needs the key twice in
    /// a row; the first press only warns.
    fn confirm_discard(&mut self, action: Armed, hint: &str, now: Instant) -> bool {
        if !self.roster.is_dirty() || self.armed == Some(action) {
            self.armed = None;
            return true;
        }
        self.armed = Some(action);
        let message = format!("Unsaved changes: press {}", hint);
        self.echo.notify(NotificationKind::Info, Some(message), now);
        false
    }

    fn request_reload(&mut self, now: Instant) -> ScreenEffect {
        if self.save_gate.is_in_flight() {
            self.armed = None;
            self.echo.notify(
                NotificationKind::Info,
                Some("Save in progress, reload once it finishes".to_string()),
                now,
            );
            return ScreenEffect::None;
        }
        if self.confirm_discard(Armed::Reload, "Ctrl-r again to reload", now) {
            ScreenEffect::Reload
        } else {
            ScreenEffect::None
        }
    }

    /// Apply `status` to every entry and remember the batch for undo
    pub fn mark_all(&mut self, status: AttendanceStatus, now: Instant) -> usize {
        let changed = self.batch.mark_all(&mut self.roster, status);
        self.refresh_view();
        let message = format!(
            "Marked all {} students {} ({} changed)",
            self.roster.len(),
            status.label(),
            changed
        );
        self.echo.notify(NotificationKind::Batch, Some(message), now);
        changed
    }

    pub fn undo_batch(&mut self, now: Instant) -> bool {
        let undone = self.batch.undo(&mut self.roster);
        if undone {
            self.refresh_view();
            self.echo.notify(NotificationKind::Undo, None, now);
        } else {
            self.echo.notify(
                NotificationKind::Info,
                Some("Nothing to undo".to_string()),
                now,
            );
        }
        undone
    }

    /// Claim the save gate and snapshot the roster. Refused while a save runs.
    pub fn request_save(&mut self, now: Instant) -> ScreenEffect {
        if !self.save_gate.try_begin() {
            self.echo.notify(
                NotificationKind::Info,
                Some("Save already in progress".to_string()),
                now,
            );
            return ScreenEffect::None;
        }
        self.echo
            .notify(NotificationKind::Info, Some("Saving...".to_string()), now);
        ScreenEffect::Save(SaveRequest {
            class_id: self.class_id.clone(),
            date: self.date,
            entries: self.roster.entries().to_vec(),
            revision: self.roster.revision(),
        })
    }

    /// Outcome of a save started by [`request_save`](Self::request_save).
    ///
    /// On failure the roster is left exactly as it is so the user can retry.
    pub fn on_save_finished(
        &mut self,
        revision: u64,
        result: Result<SaveReceipt, String>,
        now: Instant,
    ) {
        self.save_gate.finish();
        match result {
            Ok(receipt) if receipt.success => {
                self.roster.mark_saved(revision);
                let message = (!receipt.message.is_empty()).then_some(receipt.message);
                self.echo.notify(NotificationKind::Saved, message, now);
            }
            Ok(receipt) => {
                self.echo
                    .notify(NotificationKind::Error, Some(receipt.message), now);
            }
            Err(err) => {
                let message = format!("Save failed: {}", err);
                self.echo.notify(NotificationKind::Error, Some(message), now);
            }
        }
    }
}

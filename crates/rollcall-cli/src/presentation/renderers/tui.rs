//! TUI renderer for the attendance screen
//!
//! Owns the terminal and the event loop. The screen state machine, the
//! attendance ops used for reloads and the save worker are handed in by the
//! handler; every frame is drawn from a fresh `AttendanceScreenViewModel`.
//!
//! ## Design:
//! - The renderer owns only UI state (row scroll offset, hit-test rectangles)
//! - Keys are translated to logical `Key`s and passed to the screen verbatim
//! - Card rectangles are kept per display position so mouse clicks resolve to
//!   the same positions the keyboard navigates
//! - Save results from the worker are drained every tick

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
};

use crate::presentation::presenters::present_screen;
use crate::presentation::view_models::AttendanceScreenViewModel;
use crate::presentation::views::tui::{CardView, HeaderView, ModalView, StatusBarView, TableView};
use rollcall_engine::{
    AttendanceScreen, FocusTargets, Key, ScreenEffect, cells_to_px, scroll_nearest,
};
use rollcall_runtime::{AttendanceOps, SaveWorker, WorkerEvent};

const CARD_HEIGHT: u16 = 4;
const TICK: Duration = Duration::from_millis(100);
const SAVE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// How the session ended
#[derive(Debug, Clone, Copy)]
pub struct TuiOutcome {
    pub unsaved_changes: bool,
}

pub struct TuiRenderer {
    screen: AttendanceScreen,
    attendance: AttendanceOps,
    worker: SaveWorker,

    /// UI State: rectangle of every visible card, by display position
    targets: FocusTargets<Rect>,

    /// UI State: first grid row (or table line) on screen
    row_offset: usize,

    cell_width_px: u32,
    should_quit: bool,
}

impl TuiRenderer {
    pub fn new(
        screen: AttendanceScreen,
        attendance: AttendanceOps,
        worker: SaveWorker,
        cell_width_px: u32,
    ) -> Self {
        Self {
            screen,
            attendance,
            worker,
            targets: FocusTargets::new(),
            row_offset: 0,
            cell_width_px,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> Result<TuiOutcome> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result?;
        self.finish_pending_save();
        Ok(TuiOutcome {
            unsaved_changes: self.screen.roster().is_dirty(),
        })
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            let width = terminal.size()?.width;
            self.screen
                .set_viewport_width_px(cells_to_px(width, self.cell_width_px));

            let vm = present_screen(&self.screen, Instant::now());
            terminal.draw(|f| self.render(f, &vm))?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key_event(key)?,
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            while let Some(event) = self.worker.try_recv() {
                self.apply_worker_event(event);
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match self.screen.handle_key(map_key(key), Instant::now()) {
            ScreenEffect::None => {}
            ScreenEffect::Quit => self.should_quit = true,
            ScreenEffect::Save(request) => {
                if let Err(err) = self.worker.submit(request.clone()) {
                    self.screen
                        .on_save_finished(request.revision, Err(err.to_string()), Instant::now());
                }
            }
            ScreenEffect::Reload => self.reload(),
        }
        Ok(())
    }

    fn reload(&mut self) {
        let class_id = self.screen.class_id().clone();
        let date = self.screen.date();
        let result = self.attendance.roster(&class_id, date);
        match &result {
            Ok(entries) => {
                tracing::info!(class = %class_id, %date, students = entries.len(), "reloaded");
            }
            Err(err) => tracing::warn!(class = %class_id, %date, error = %err, "reload failed"),
        }
        self.row_offset = 0;
        self.screen
            .load(result.map_err(|e| e.to_string()), Instant::now());
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let at = Position::new(mouse.column, mouse.row);
        if let Some(position) = self.targets.position_where(|r| r.contains(at)) {
            self.screen.click(position);
        }
    }

    fn apply_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Saved { revision, result } => {
                self.screen.on_save_finished(
                    revision,
                    result.map_err(|e| e.to_string()),
                    Instant::now(),
                );
            }
        }
    }

    /// A save still running at quit is waited for so its result is not lost
    fn finish_pending_save(&mut self) {
        if !self.screen.is_saving() {
            return;
        }
        match self.worker.recv_timeout(SAVE_DRAIN_TIMEOUT) {
            Some(event) => self.apply_worker_event(event),
            None => tracing::warn!("save still running at exit"),
        }
    }

    fn render(&mut self, f: &mut Frame, vm: &AttendanceScreenViewModel) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3),
        ])
        .split(f.area());

        f.render_widget(HeaderView::new(&vm.header), chunks[0]);
        if vm.table {
            self.render_table(f, vm, chunks[1]);
        } else {
            self.render_grid(f, vm, chunks[1]);
        }
        f.render_widget(StatusBarView::new(&vm.status_bar), chunks[2]);

        if let Some(modal) = &vm.modal {
            f.render_widget(ModalView::new(modal), f.area());
        }
    }

    fn render_grid(&mut self, f: &mut Frame, vm: &AttendanceScreenViewModel, area: Rect) {
        self.targets.clear();
        let columns = vm.columns.max(1);
        let card_width = area.width / columns as u16;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        if let Some(focused) = vm.cards.iter().position(|c| c.focused) {
            self.row_offset = scroll_nearest(self.row_offset, visible_rows, focused / columns);
        }

        for card in &vm.cards {
            let row = card.position / columns;
            let col = card.position % columns;
            if row < self.row_offset || row >= self.row_offset + visible_rows {
                self.targets.push(Rect::default());
                continue;
            }
            let rect = Rect {
                x: area.x + col as u16 * card_width,
                y: area.y + (row - self.row_offset) as u16 * CARD_HEIGHT,
                width: card_width,
                height: CARD_HEIGHT,
            };
            self.targets.push(rect);
            f.render_widget(CardView::new(card), rect);
        }
    }

    fn render_table(&mut self, f: &mut Frame, vm: &AttendanceScreenViewModel, area: Rect) {
        self.targets.clear();
        // Border top and bottom plus the header line
        let visible = area.height.saturating_sub(3).max(1) as usize;
        if let Some(focused) = vm.cards.iter().position(|c| c.focused) {
            self.row_offset = scroll_nearest(self.row_offset, visible, focused);
        }
        let start = self.row_offset.min(vm.cards.len());
        let end = (start + visible).min(vm.cards.len());

        for position in 0..vm.cards.len() {
            if (start..end).contains(&position) {
                self.targets.push(Rect {
                    x: area.x + 1,
                    y: area.y + 2 + (position - start) as u16,
                    width: area.width.saturating_sub(2),
                    height: 1,
                });
            } else {
                self.targets.push(Rect::default());
            }
        }
        f.render_widget(TableView::new(&vm.cards[start..end]), area);
    }
}

fn map_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_runtime::{Config, MemoryBackend, Rollcall};
    use rollcall_types::{ClassId, RosterEntry, StudentId};
    use std::sync::Arc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), Key::Ctrl('s'));
        assert_eq!(map_key(key(KeyCode::Char('S'), KeyModifiers::CONTROL)), Key::Ctrl('s'));
        assert_eq!(map_key(key(KeyCode::Char(' '), KeyModifiers::NONE)), Key::Space);
        assert_eq!(map_key(key(KeyCode::Char('P'), KeyModifiers::SHIFT)), Key::Char('P'));
        assert_eq!(map_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Key::BackTab);
        assert_eq!(map_key(key(KeyCode::F(1), KeyModifiers::NONE)), Key::Other);
    }

    fn workspace() -> Rollcall {
        Rollcall::with_backend(
            "/tmp/unused".into(),
            Arc::new(MemoryBackend::new()),
            Config::default(),
        )
    }

    fn renderer(count: usize) -> TuiRenderer {
        let entries = (0..count)
            .map(|i| {
                let id = StudentId::new(format!("s{}", i));
                RosterEntry::new(id, i as u32 + 1, format!("Student {}", i))
            })
            .collect();
        let screen = AttendanceScreen::new(
            ClassId::new("1a"),
            "2024-09-02".parse().unwrap(),
            entries,
            Default::default(),
        );
        let workspace = workspace();
        TuiRenderer::new(screen, workspace.attendance(), workspace.save_worker(), 8)
    }

    fn press(renderer: &mut TuiRenderer, code: KeyCode, modifiers: KeyModifiers) {
        renderer.handle_key_event(key(code, modifiers)).unwrap();
    }

    #[test]
    fn test_reload_discards_local_edits_after_confirmation() {
        let workspace = workspace();
        let class = ClassId::new("4d");
        workspace.seed_demo(&class).unwrap();
        let date = "2024-09-02".parse().unwrap();
        let entries = workspace.attendance().roster(&class, date).unwrap();
        let screen = AttendanceScreen::new(class, date, entries, Default::default());
        let mut renderer =
            TuiRenderer::new(screen, workspace.attendance(), workspace.save_worker(), 8);

        press(&mut renderer, KeyCode::Home, KeyModifiers::NONE);
        press(&mut renderer, KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(renderer.screen.roster().is_dirty());

        press(&mut renderer, KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(renderer.screen.roster().is_dirty());
        press(&mut renderer, KeyCode::Char('r'), KeyModifiers::CONTROL);

        assert!(!renderer.screen.roster().is_dirty());
        assert_eq!(renderer.screen.summary().present, 24);
        // same students in the same order: focus stays put
        assert_eq!(renderer.screen.focused(), Some(0));
    }

    #[test]
    fn test_click_focuses_the_card_under_the_pointer() {
        use ratatui::backend::TestBackend;

        let mut renderer = renderer(8);
        renderer.screen.set_viewport_width_px(cells_to_px(120, 8));
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let vm = present_screen(&renderer.screen, Instant::now());
        terminal.draw(|f| renderer.render(f, &vm)).unwrap();

        assert_eq!(renderer.targets.len(), 8);
        let target = *renderer.targets.get(5).unwrap();
        renderer.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x + 1,
            row: target.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(renderer.screen.focused(), Some(5));
    }

    #[test]
    fn test_focused_row_is_scrolled_into_view() {
        use ratatui::backend::TestBackend;

        let mut renderer = renderer(60);
        renderer.screen.set_viewport_width_px(cells_to_px(120, 8));
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        renderer
            .handle_key_event(key(KeyCode::End, KeyModifiers::NONE))
            .unwrap();
        let vm = present_screen(&renderer.screen, Instant::now());
        terminal.draw(|f| renderer.render(f, &vm)).unwrap();

        let last = *renderer.targets.get(59).unwrap();
        assert_ne!(last, Rect::default());
        assert_eq!(*renderer.targets.get(0).unwrap(), Rect::default());
    }
}

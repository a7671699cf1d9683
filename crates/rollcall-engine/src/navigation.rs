//! Keyboard focus state machine for the attendance roster.
//!
//! The roster is a 1-D sequence laid out as a 2-D grid of `columns` per row.
//! The navigator owns only the focused position; item count and column count
//! are passed on every key so the handler never works from a stale snapshot.
//!
//! ## Transition rules
//! - Left / Right step by one and clamp at the ends.
//! - Up / Down step a full row and refuse to move past an edge (no clamping
//!   onto a partial last row).
//! - Home / End jump to the first / last entry.
//! - From the unfocused state every directional key focuses entry 0.
//! - Enter / Space confirm the focused entry; `p` / `l` / `a` assign a status.

use rollcall_types::AttendanceStatus;

/// Logical key, decoupled from the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Space,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Char(char),
    Ctrl(char),
    Other,
}

/// What currently holds keyboard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyTarget {
    /// A text field (search box); typing must never be intercepted
    TextInput,
    #[default]
    Other,
}

/// Where a key event was delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub target: KeyTarget,
    pub modal_open: bool,
}

impl KeyContext {
    pub fn text_input() -> Self {
        Self {
            target: KeyTarget::TextInput,
            modal_open: false,
        }
    }

    pub fn modal() -> Self {
        Self {
            target: KeyTarget::Other,
            modal_open: true,
        }
    }

    fn suppresses_navigation(&self) -> bool {
        self.target == KeyTarget::TextInput || self.modal_open
    }
}

/// Shape of the visible roster at the moment a key arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub item_count: usize,
    pub columns: usize,
}

impl GridMetrics {
    /// Column counts below one are treated as one.
    pub fn new(item_count: usize, columns: usize) -> Self {
        Self {
            item_count,
            columns: columns.max(1),
        }
    }

    /// Build from signed inputs, clamping negative counts to zero.
    pub fn from_signed(item_count: i64, columns: i64) -> Self {
        Self::new(
            usize::try_from(item_count).unwrap_or(0),
            usize::try_from(columns).unwrap_or(0),
        )
    }
}

/// Command the hosting screen carries out after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Focus landed on this position (possibly where it already was): scroll
    /// the element into view and give it input focus
    Focus(usize),
    /// Confirm on the focused entry (cycles its status)
    Select(usize),
    /// Assign an absolute status to the focused entry
    SetStatus {
        index: usize,
        status: AttendanceStatus,
    },
}

/// Result of offering a key to the navigator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Key was recognised; nothing else should act on it
    pub handled: bool,
    pub command: Option<NavCommand>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed(command: Option<NavCommand>) -> Self {
        Self {
            handled: true,
            command,
        }
    }
}

/// Focus state. `None` is the unfocused state (index -1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    focused: Option<usize>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focused index with -1 meaning nothing is focused
    pub fn focused_index(&self) -> i64 {
        self.focused.map_or(-1, |i| i as i64)
    }

    pub fn reset(&mut self) {
        self.focused = None;
    }

    /// An element received focus directly (pointer click, Tab).
    ///
    /// Returns false and leaves the state alone when `index` is out of range.
    pub fn focus(&mut self, index: usize, item_count: usize) -> bool {
        if index >= item_count {
            return false;
        }
        self.focused = Some(index);
        true
    }

    /// Drop a focused index that no longer fits the roster
    pub fn revalidate(&mut self, item_count: usize) {
        if self.focused.is_some_and(|i| i >= item_count) {
            self.focused = None;
        }
    }

    pub fn handle_key(&mut self, key: Key, ctx: KeyContext, metrics: GridMetrics) -> KeyOutcome {
        if ctx.suppresses_navigation() {
            return KeyOutcome::ignored();
        }

        let metrics = GridMetrics::new(metrics.item_count, metrics.columns);
        self.revalidate(metrics.item_count);

        match key {
            Key::Right | Key::Left | Key::Down | Key::Up | Key::Home | Key::End => {
                let command = self.step(key, metrics).map(NavCommand::Focus);
                KeyOutcome::consumed(command)
            }
            Key::Enter | Key::Space => match self.focused {
                Some(index) => KeyOutcome::consumed(Some(NavCommand::Select(index))),
                None => KeyOutcome::ignored(),
            },
            Key::Char(c) => match (AttendanceStatus::from_shortcut(c), self.focused) {
                (Some(status), Some(index)) => {
                    KeyOutcome::consumed(Some(NavCommand::SetStatus { index, status }))
                }
                _ => KeyOutcome::ignored(),
            },
            _ => KeyOutcome::ignored(),
        }
    }

    /// Apply a directional key. Returns the focused index, which may be the
    /// one focus already had when the move hit an edge; `None` on an empty roster.
    fn step(&mut self, key: Key, metrics: GridMetrics) -> Option<usize> {
        let GridMetrics {
            item_count: n,
            columns,
        } = metrics;
        if n == 0 {
            return None;
        }

        let target = match (key, self.focused) {
            (Key::Home, _) => 0,
            (Key::End, _) => n - 1,
            (_, None) => 0,
            (Key::Right, Some(i)) => (i + 1).min(n - 1),
            (Key::Left, Some(i)) => i.saturating_sub(1),
            (Key::Down, Some(i)) if i + columns < n => i + columns,
            (Key::Up, Some(i)) if i >= columns => i - columns,
            (_, Some(i)) => i,
        };

        self.focused = Some(target);
        Some(target)
    }
}

/// Element handles indexed by display position, rebuilt by the view each frame.
///
/// The navigator works in positions; the view resolves a position to whatever
/// it needs to scroll to or hit-test (screen rectangles in the terminal UI).
#[derive(Debug, Clone)]
pub struct FocusTargets<H> {
    handles: Vec<H>,
}

impl<H> Default for FocusTargets<H> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<H> FocusTargets<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Register the handle for the next display position
    pub fn push(&mut self, handle: H) -> usize {
        self.handles.push(handle);
        self.handles.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&H> {
        self.handles.get(position)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// First position whose handle satisfies `pred` (e.g. contains a click)
    pub fn position_where(&self, pred: impl Fn(&H) -> bool) -> Option<usize> {
        self.handles.iter().position(pred)
    }
}

/// Scroll offset that brings `target` into a window of `visible` lines with
/// the least movement ("nearest" alignment).
pub fn scroll_nearest(offset: usize, visible: usize, target: usize) -> usize {
    let visible = visible.max(1);
    if target < offset {
        target
    } else if target >= offset + visible {
        target + 1 - visible
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(nav: &mut Navigator, key: Key, n: usize, cols: usize) -> KeyOutcome {
        nav.handle_key(key, KeyContext::default(), GridMetrics::new(n, cols))
    }

    #[test]
    fn test_right_from_unfocused_then_clamps() {
        for n in 1..=6 {
            let mut nav = Navigator::new();
            press(&mut nav, Key::Right, n, 3);
            assert_eq!(nav.focused(), Some(0));
            for expected in 1..n + 3 {
                press(&mut nav, Key::Right, n, 3);
                assert_eq!(nav.focused(), Some(expected.min(n - 1)));
            }
        }
    }

    #[test]
    fn test_left_clamps_at_zero() {
        let mut nav = Navigator::new();
        press(&mut nav, Key::Left, 5, 1);
        assert_eq!(nav.focused(), Some(0));
        // at the edge the key is still acknowledged, index unchanged
        let outcome = press(&mut nav, Key::Left, 5, 1);
        assert!(outcome.handled);
        assert_eq!(outcome.command, Some(NavCommand::Focus(0)));
        assert_eq!(nav.focused(), Some(0));
    }

    #[test]
    fn test_end_then_home() {
        for n in 1..=8 {
            let mut nav = Navigator::new();
            press(&mut nav, Key::End, n, 4);
            assert_eq!(nav.focused(), Some(n - 1));
            press(&mut nav, Key::Home, n, 4);
            assert_eq!(nav.focused(), Some(0));
        }
    }

    #[test]
    fn test_vertical_strides_refuse_partial_rows() {
        let mut nav = Navigator::new();
        assert!(nav.focus(3, 10));

        press(&mut nav, Key::Down, 10, 4);
        assert_eq!(nav.focused(), Some(7));
        // 7 + 4 = 11 is past the end: stay put
        press(&mut nav, Key::Down, 10, 4);
        assert_eq!(nav.focused(), Some(7));
        press(&mut nav, Key::Up, 10, 4);
        assert_eq!(nav.focused(), Some(3));
        // 3 - 4 < 0: stay put
        press(&mut nav, Key::Up, 10, 4);
        assert_eq!(nav.focused(), Some(3));
    }

    #[test]
    fn test_vertical_from_unfocused_focuses_first() {
        let mut nav = Navigator::new();
        let outcome = press(&mut nav, Key::Up, 10, 4);
        assert_eq!(outcome.command, Some(NavCommand::Focus(0)));

        let mut nav = Navigator::new();
        press(&mut nav, Key::Down, 10, 4);
        assert_eq!(nav.focused(), Some(0));
    }

    #[test]
    fn test_empty_roster_is_inert() {
        let keys = [
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Home,
            Key::End,
            Key::Enter,
            Key::Space,
            Key::Char('p'),
            Key::Char('L'),
            Key::Char('a'),
        ];
        let mut nav = Navigator::new();
        for key in keys {
            let outcome = press(&mut nav, key, 0, 4);
            assert_eq!(outcome.command, None, "{:?}", key);
            assert_eq!(nav.focused(), None);
        }
    }

    #[test]
    fn test_status_keys_target_focused_entry() {
        let mut nav = Navigator::new();
        assert_eq!(press(&mut nav, Key::Char('p'), 3, 1).command, None);

        nav.focus(2, 3);
        assert_eq!(
            press(&mut nav, Key::Char('P'), 3, 1).command,
            Some(NavCommand::SetStatus {
                index: 2,
                status: AttendanceStatus::Present
            })
        );
        assert_eq!(
            press(&mut nav, Key::Char('l'), 3, 1).command,
            Some(NavCommand::SetStatus {
                index: 2,
                status: AttendanceStatus::Leave
            })
        );
        assert_eq!(
            press(&mut nav, Key::Space, 3, 1).command,
            Some(NavCommand::Select(2))
        );
        assert!(!press(&mut nav, Key::Char('x'), 3, 1).handled);
    }

    #[test]
    fn test_text_input_and_modal_suppress_everything() {
        let mut nav = Navigator::new();
        nav.focus(1, 5);

        let metrics = GridMetrics::new(5, 1);
        let outcome = nav.handle_key(Key::Right, KeyContext::text_input(), metrics);
        assert!(!outcome.handled);
        assert_eq!(nav.focused(), Some(1));

        let outcome = nav.handle_key(Key::Char('a'), KeyContext::modal(), metrics);
        assert!(!outcome.handled);
        assert_eq!(outcome.command, None);
    }

    #[test]
    fn test_misuse_is_clamped() {
        let metrics = GridMetrics::from_signed(-3, 0);
        assert_eq!(metrics, GridMetrics::new(0, 1));

        // zero columns behaves like one column
        let mut nav = Navigator::new();
        nav.focus(0, 3);
        let raw = GridMetrics {
            item_count: 3,
            columns: 0,
        };
        nav.handle_key(Key::Down, KeyContext::default(), raw);
        assert_eq!(nav.focused(), Some(1));
    }

    #[test]
    fn test_stale_focus_is_dropped() {
        let mut nav = Navigator::new();
        nav.focus(8, 10);
        let outcome = press(&mut nav, Key::Right, 4, 1);
        // stale index reset, then the key acts from the unfocused state
        assert_eq!(outcome.command, Some(NavCommand::Focus(0)));
        assert_eq!(nav.focused_index(), 0);
    }

    #[test]
    fn test_focus_rejects_out_of_range() {
        let mut nav = Navigator::new();
        assert!(!nav.focus(3, 3));
        assert_eq!(nav.focused_index(), -1);
    }

    #[test]
    fn test_scroll_nearest() {
        assert_eq!(scroll_nearest(0, 5, 3), 0);
        assert_eq!(scroll_nearest(0, 5, 5), 1);
        assert_eq!(scroll_nearest(4, 5, 2), 2);
        assert_eq!(scroll_nearest(2, 0, 9), 9);
    }

    #[test]
    fn test_focus_targets_hit_test() {
        let mut targets: FocusTargets<(u16, u16)> = FocusTargets::new();
        targets.push((0, 10));
        targets.push((10, 20));
        assert_eq!(targets.position_where(|(a, b)| (*a..*b).contains(&12)), Some(1));
        targets.clear();
        assert!(targets.is_empty());
    }
}

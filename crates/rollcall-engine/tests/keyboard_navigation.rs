use std::time::{Duration, Instant};

use rollcall_engine::{AttendanceScreen, Key, NotificationKind, ScreenSettings, ViewMode};
use rollcall_types::{AttendanceStatus, ClassId, RosterEntry, StudentId};

fn roster(n: usize) -> Vec<RosterEntry> {
    (0..n)
        .map(|i| {
            RosterEntry::new(
                StudentId::new(format!("stu-{:02}", i)),
                i as u32 + 1,
                format!("Student {:02}", i),
            )
        })
        .collect()
}

fn grid_screen(n: usize, width_px: u32) -> AttendanceScreen {
    let mut screen = AttendanceScreen::new(
        ClassId::new("5a"),
        "2024-10-07".parse().unwrap(),
        roster(n),
        ScreenSettings::default(),
    );
    screen.set_viewport_width_px(width_px);
    screen
}

fn status_at(screen: &AttendanceScreen, position: usize) -> AttendanceStatus {
    screen
        .view()
        .entry_at(screen.roster(), position)
        .map(|e| e.status)
        .unwrap()
}

#[test]
fn worked_example_four_column_grid() {
    let now = Instant::now();
    let mut screen = grid_screen(10, 1100);
    assert_eq!(screen.mode(), ViewMode::Grid);
    assert_eq!(screen.columns(), 4);
    assert_eq!(screen.focused_index(), -1);

    screen.handle_key(Key::Tab, now);
    assert_eq!(screen.focused(), Some(0));
    screen.handle_key(Key::Right, now);
    assert_eq!(screen.focused(), Some(1));
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(5));
    screen.handle_key(Key::Left, now);
    assert_eq!(screen.focused(), Some(4));
    screen.handle_key(Key::Up, now);
    assert_eq!(screen.focused(), Some(0));
}

#[test]
fn down_stops_before_partial_row() {
    let now = Instant::now();
    let mut screen = grid_screen(10, 1100);
    screen.click(3);

    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(7));
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(7));
    screen.handle_key(Key::Up, now);
    assert_eq!(screen.focused(), Some(3));
    screen.handle_key(Key::Up, now);
    assert_eq!(screen.focused(), Some(3));
}

#[test]
fn table_view_navigates_one_row_at_a_time() {
    let now = Instant::now();
    let mut screen = grid_screen(6, 1600);
    screen.handle_key(Key::Char('v'), now);
    assert_eq!(screen.columns(), 1);

    screen.handle_key(Key::Down, now);
    screen.handle_key(Key::Down, now);
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(2));
}

#[test]
fn direct_assignment_ignores_prior_status() {
    let now = Instant::now();
    let mut screen = grid_screen(3, 500);
    screen.handle_key(Key::Right, now);

    screen.handle_key(Key::Char('p'), now);
    assert_eq!(status_at(&screen, 0), AttendanceStatus::Present);
    screen.handle_key(Key::Char('L'), now);
    assert_eq!(status_at(&screen, 0), AttendanceStatus::Leave);
    screen.handle_key(Key::Char('a'), now);
    assert_eq!(status_at(&screen, 0), AttendanceStatus::Absent);
    screen.handle_key(Key::Char('A'), now);
    assert_eq!(status_at(&screen, 0), AttendanceStatus::Absent);
}

#[test]
fn confirm_cycles_status() {
    let now = Instant::now();
    let mut screen = grid_screen(3, 500);
    screen.handle_key(Key::End, now);

    let expected = [
        AttendanceStatus::Leave,
        AttendanceStatus::Absent,
        AttendanceStatus::Present,
        AttendanceStatus::Leave,
    ];
    for (i, status) in expected.into_iter().enumerate() {
        let key = if i % 2 == 0 { Key::Enter } else { Key::Space };
        screen.handle_key(key, now);
        assert_eq!(status_at(&screen, 2), status);
    }
    assert_eq!(
        screen.notification(now).map(|n| n.kind),
        Some(NotificationKind::Cycle)
    );
}

#[test]
fn empty_roster_ignores_every_key() {
    let now = Instant::now();
    let mut screen = grid_screen(0, 1100);
    for key in [
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::Home,
        Key::End,
        Key::Tab,
        Key::Enter,
        Key::Space,
        Key::Char('p'),
        Key::Char('l'),
        Key::Char('a'),
    ] {
        screen.handle_key(key, now);
        assert_eq!(screen.focused_index(), -1);
    }
    assert!(!screen.roster().is_dirty());
}

#[test]
fn search_box_swallows_arrow_keys() {
    let now = Instant::now();
    let mut screen = grid_screen(8, 1100);
    screen.handle_key(Key::Right, now);
    screen.handle_key(Key::Right, now);
    screen.handle_key(Key::Char('/'), now);

    screen.handle_key(Key::Right, now);
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(1));
}

#[test]
fn latest_notification_wins_and_expires() {
    let t0 = Instant::now();
    let mut screen = grid_screen(2, 500);
    screen.handle_key(Key::Right, t0);
    screen.handle_key(Key::Char('p'), t0);
    assert_eq!(
        screen.notification(t0).map(|n| n.kind),
        Some(NotificationKind::Present)
    );

    let t1 = t0 + Duration::from_millis(1200);
    screen.handle_key(Key::Char('a'), t1);
    let shown = screen.notification(t1).unwrap();
    assert_eq!(shown.kind, NotificationKind::Absent);
    assert_eq!(shown.message, "Marked as Absent (A)");

    assert!(
        screen
            .notification(t1 + Duration::from_millis(1999))
            .is_some()
    );
    assert!(
        screen
            .notification(t1 + Duration::from_millis(2000))
            .is_none()
    );
}

#[test]
fn resize_changes_vertical_stride() {
    let now = Instant::now();
    let mut screen = grid_screen(20, 1300);
    screen.click(0);
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(5));

    screen.set_viewport_width_px(700);
    screen.handle_key(Key::Down, now);
    assert_eq!(screen.focused(), Some(7));
}

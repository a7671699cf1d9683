use std::time::Instant;

use rollcall_engine::{AttendanceScreen, Modal, NotificationKind, SortDirection, ViewMode};

use super::roster::present_summary;
use crate::presentation::view_models::{
    AttendanceScreenViewModel, CardViewModel, HeaderViewModel, ModalViewModel, NoticeViewModel,
    StatusBarViewModel, StatusLevel,
};

pub const KEY_BINDINGS: [(&str, &str); 18] = [
    ("←/→", "Previous / next student"),
    ("↑/↓", "Same column, row above / below"),
    ("Home/End", "First / last student"),
    ("Tab/Shift-Tab", "Focus next / previous"),
    ("Enter/Space", "Cycle Present → Leave → Absent"),
    ("P / A / L", "Mark Present / Absent / Leave"),
    ("/", "Search by name or roll number"),
    ("f", "Filter by status"),
    ("s / r", "Change sort / reverse it"),
    ("v", "Toggle grid / table"),
    ("m", "Mark everyone…"),
    ("u", "Undo last mark-all"),
    ("Ctrl-s", "Save"),
    ("Ctrl-r", "Reload the day, dropping unsaved marks"),
    ("?", "This help"),
    ("Esc", "Clear search / close"),
    ("q", "Quit"),
    ("Ctrl-c", "Quit without asking"),
];

fn level_of(kind: NotificationKind) -> StatusLevel {
    match kind {
        NotificationKind::Error => StatusLevel::Error,
        NotificationKind::Saved | NotificationKind::Present => StatusLevel::Success,
        NotificationKind::Absent | NotificationKind::Leave | NotificationKind::Batch => {
            StatusLevel::Warning
        }
        NotificationKind::Cycle
        | NotificationKind::Navigate
        | NotificationKind::Undo
        | NotificationKind::Info => StatusLevel::Info,
    }
}

pub fn present_screen(screen: &AttendanceScreen, now: Instant) -> AttendanceScreenViewModel {
    let view = screen.view();
    let focused = screen.focused();

    let cards: Vec<CardViewModel> = screen
        .visible_entries()
        .enumerate()
        .map(|(position, e)| CardViewModel {
            position,
            roll_number: e.roll_number,
            name: e.name.clone(),
            status: e.status,
            focused: focused == Some(position),
            is_online: e.is_online,
        })
        .collect();

    let arrow = match view.direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    };
    let header = HeaderViewModel {
        title: format!("Class {} · {}", screen.class_id(), screen.date()),
        view_label: screen.mode().label().to_string(),
        sort_label: format!("{} {}", view.sort.label(), arrow),
        filter_label: view
            .filter
            .status
            .map_or("all".to_string(), |s| s.label().to_string()),
        search_query: screen.search_query().to_string(),
        searching: screen.is_searching(),
        dirty: screen.roster().is_dirty(),
        saving: screen.is_saving(),
        summary: present_summary(screen.summary()),
    };

    let focus_label = match focused.and_then(|i| cards.get(i)) {
        Some(card) => format!(
            "{}/{} · #{} {}",
            card.position + 1,
            cards.len(),
            card.roll_number,
            card.name
        ),
        None if cards.is_empty() => "No students".to_string(),
        None => format!("{} students · press Tab or an arrow key", cards.len()),
    };
    let notice = screen.notification(now).map(|n| NoticeViewModel {
        message: n.message.clone(),
        level: level_of(n.kind),
    });

    let modal = screen.modal().map(|m| match m {
        Modal::Help => ModalViewModel::Help {
            bindings: KEY_BINDINGS
                .iter()
                .map(|(k, d)| (k.to_string(), d.to_string()))
                .collect(),
        },
        Modal::MarkAll { choice } => ModalViewModel::MarkAll {
            choice,
            total: screen.roster().len(),
        },
    });

    AttendanceScreenViewModel {
        header,
        columns: screen.columns(),
        table: screen.mode() == ViewMode::Table,
        cards,
        status_bar: StatusBarViewModel {
            notice,
            focus_label,
        },
        modal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_engine::{Key, ScreenSettings};
    use rollcall_types::{AttendanceStatus, ClassId, RosterEntry, StudentId};

    fn screen() -> AttendanceScreen {
        let entries = ["Ada", "Ben", "Cy"]
            .iter()
            .enumerate()
            .map(|(i, n)| RosterEntry::new(StudentId::new(*n), i as u32 + 1, *n))
            .collect();
        let mut screen = AttendanceScreen::new(
            ClassId::new("3c"),
            "2024-09-02".parse().unwrap(),
            entries,
            ScreenSettings::default(),
        );
        screen.set_viewport_width_px(1100);
        screen
    }

    #[test]
    fn test_focus_and_notice_reach_view_model() {
        let now = Instant::now();
        let mut screen = screen();
        screen.handle_key(Key::Right, now);
        screen.handle_key(Key::Right, now);
        screen.handle_key(Key::Char('l'), now);

        let vm = present_screen(&screen, now);
        assert_eq!(vm.columns, 4);
        assert!(vm.cards[1].focused);
        assert_eq!(vm.cards[1].status, AttendanceStatus::Leave);
        assert!(vm.header.dirty);
        assert_eq!(vm.status_bar.focus_label, "2/3 · #2 Ben");
        let notice = vm.status_bar.notice.unwrap();
        assert_eq!(notice.message, "Marked as Leave (L)");
        assert_eq!(notice.level, StatusLevel::Warning);
    }

    #[test]
    fn test_mark_all_modal() {
        let now = Instant::now();
        let mut screen = screen();
        screen.handle_key(Key::Char('m'), now);
        screen.handle_key(Key::Char('a'), now);
        let vm = present_screen(&screen, now);
        assert!(matches!(
            vm.modal,
            Some(ModalViewModel::MarkAll {
                choice: Some(AttendanceStatus::Absent),
                total: 3
            })
        ));
    }
}

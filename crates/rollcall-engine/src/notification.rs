use std::time::{Duration, Instant};

use rollcall_types::AttendanceStatus;
use serde::Serialize;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

/// Kind of action a notification acknowledges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Present,
    Absent,
    Leave,
    Cycle,
    Navigate,
    Batch,
    Undo,
    Saved,
    Info,
    Error,
}

impl NotificationKind {
    pub fn default_message(&self) -> &'static str {
        match self {
            NotificationKind::Present => "Marked as Present (P)",
            NotificationKind::Absent => "Marked as Absent (A)",
            NotificationKind::Leave => "Marked as Leave (L)",
            NotificationKind::Cycle => "Status cycled (Enter)",
            NotificationKind::Navigate => "Moved focus",
            NotificationKind::Batch => "Applied to all students",
            NotificationKind::Undo => "Last batch action undone",
            NotificationKind::Saved => "Attendance saved",
            NotificationKind::Info => "",
            NotificationKind::Error => "Something went wrong",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NotificationKind::Error)
    }
}

impl From<AttendanceStatus> for NotificationKind {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => NotificationKind::Present,
            AttendanceStatus::Absent => NotificationKind::Absent,
            AttendanceStatus::Leave => NotificationKind::Leave,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip)]
    pub expires_at: Instant,
}

/// Last-write-wins acknowledgement of the most recent keyboard action.
///
/// Holds at most one notification; a new one replaces the pending one and
/// restarts the timer. Time is passed in so callers (and tests) own the clock.
#[derive(Debug, Clone)]
pub struct NotificationEcho {
    ttl: Duration,
    current: Option<Notification>,
}

impl Default for NotificationEcho {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationEcho {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: Option<String>, now: Instant) {
        let message = message.unwrap_or_else(|| kind.default_message().to_string());
        self.current = Some(Notification {
            kind,
            message,
            expires_at: now + self.ttl,
        });
    }

    /// Notification still on screen at `now`
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| now < n.expires_at)
    }

    /// Drop an expired notification
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_notification_supersedes() {
        let t0 = Instant::now();
        let mut echo = NotificationEcho::default();

        echo.notify(NotificationKind::Present, None, t0);
        let t1 = t0 + Duration::from_millis(500);
        echo.notify(NotificationKind::Absent, None, t1);

        let shown = echo.visible(t1).unwrap();
        assert_eq!(shown.kind, NotificationKind::Absent);
        assert_eq!(shown.message, "Marked as Absent (A)");

        // first one would have expired at t0+2000, the second is still live
        assert!(echo.visible(t0 + Duration::from_millis(2100)).is_some());
        assert!(echo.visible(t1 + Duration::from_millis(2000)).is_none());
    }

    #[test]
    fn test_expiry_and_tick() {
        let t0 = Instant::now();
        let mut echo = NotificationEcho::new(Duration::from_millis(100));
        echo.notify(NotificationKind::Info, Some("hello".into()), t0);
        assert_eq!(echo.visible(t0).unwrap().message, "hello");

        echo.tick(t0 + Duration::from_millis(99));
        assert!(echo.visible(t0 + Duration::from_millis(99)).is_some());
        echo.tick(t0 + Duration::from_millis(100));
        assert!(echo.visible(t0).is_none());
    }

    #[test]
    fn test_default_messages_per_status() {
        assert_eq!(
            NotificationKind::from(AttendanceStatus::Present).default_message(),
            "Marked as Present (P)"
        );
        assert_eq!(
            NotificationKind::from(AttendanceStatus::Leave).default_message(),
            "Marked as Leave (L)"
        );
    }
}

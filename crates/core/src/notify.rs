//! Single-slot toast notification state machine.
//!
//! The notifier holds at most one transient message: `{Empty, Showing}`.
//! Issuing a new notification supersedes the current one (last write wins)
//! and restarts the display window. Expiry is checked lazily against the
//! clock passed by the caller, which replaces the original timer handle:
//! superseding a notification discards its deadline along with it, so a
//! stale deadline can never clear a newer message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long a notification stays visible if not superseded.
pub const DISPLAY_MS: i64 = 3000;

/// Notification severity, mapped to toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    /// CSS class suffix for templates.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A transient message with its display deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Monotonically increasing token; a higher token always wins.
    pub token: u64,
    pub message: String,
    pub severity: Severity,
    deadline: DateTime<Utc>,
}

impl Notification {
    /// Whether this notification is still within its display window.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.deadline
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "state")]
enum Slot {
    #[default]
    Empty,
    Showing(Notification),
}

/// The single-slot notifier.
///
/// There is no queue: a `notify` while a message is showing replaces it
/// immediately. Tokens strictly increase across the notifier's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Notifier {
    slot: Slot,
    next_token: u64,
}

impl Notifier {
    /// Create an empty notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Slot::Empty,
            next_token: 0,
        }
    }

    /// Issue a notification, superseding any current one.
    ///
    /// Returns the token of the new notification.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.slot = Slot::Showing(Notification {
            token,
            message: message.into(),
            severity,
            deadline: now + chrono::Duration::milliseconds(DISPLAY_MS),
        });
        token
    }

    /// The current notification, if it has not lapsed.
    ///
    /// A lapsed notification transitions the slot to `Empty` before
    /// returning `None`.
    pub fn current(&mut self, now: DateTime<Utc>) -> Option<&Notification> {
        if let Slot::Showing(notification) = &self.slot
            && !notification.is_live(now)
        {
            self.slot = Slot::Empty;
        }

        match &self.slot {
            Slot::Showing(notification) => Some(notification),
            Slot::Empty => None,
        }
    }

    /// Whether the slot holds a live notification.
    pub fn is_showing(&mut self, now: DateTime<Utc>) -> bool {
        self.current(now).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn ms(offset: i64) -> DateTime<Utc> {
        t0() + chrono::Duration::milliseconds(offset)
    }

    #[test]
    fn test_empty_notifier_shows_nothing() {
        let mut notifier = Notifier::new();
        assert!(notifier.current(t0()).is_none());
    }

    #[test]
    fn test_notification_visible_within_window() {
        let mut notifier = Notifier::new();
        notifier.notify("Agregado al carrito", Severity::Success, t0());

        let current = notifier.current(ms(2999)).unwrap();
        assert_eq!(current.message, "Agregado al carrito");
        assert_eq!(current.severity, Severity::Success);
    }

    #[test]
    fn test_notification_lapses_after_timeout() {
        let mut notifier = Notifier::new();
        notifier.notify("hola", Severity::Info, t0());

        assert!(notifier.current(ms(DISPLAY_MS)).is_none());
        // The slot stays empty afterwards, even at earlier clock readings.
        assert!(notifier.current(t0()).is_none());
    }

    #[test]
    fn test_supersession_is_last_write_wins() {
        let mut notifier = Notifier::new();
        let first = notifier.notify("primero", Severity::Success, t0());
        let second = notifier.notify("segundo", Severity::Info, ms(1000));
        assert!(second > first);

        // Only the latest is ever visible.
        let current = notifier.current(ms(1500)).unwrap();
        assert_eq!(current.token, second);
        assert_eq!(current.message, "segundo");
    }

    #[test]
    fn test_supersession_cancels_previous_deadline() {
        let mut notifier = Notifier::new();
        notifier.notify("primero", Severity::Success, t0());
        // Reissue just before the first would lapse.
        notifier.notify("segundo", Severity::Info, ms(2900));

        // Past the first deadline, the second is still showing: the first's
        // expiry died with it.
        let current = notifier.current(ms(3500)).unwrap();
        assert_eq!(current.message, "segundo");

        // The second lapses on its own schedule.
        assert!(notifier.current(ms(2900 + DISPLAY_MS)).is_none());
    }

    #[test]
    fn test_tokens_strictly_increase() {
        let mut notifier = Notifier::new();
        let a = notifier.notify("a", Severity::Info, t0());
        let b = notifier.notify("b", Severity::Info, ms(5000));
        let c = notifier.notify("c", Severity::Info, ms(10000));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_serde_roundtrip_preserves_token_counter() {
        let mut notifier = Notifier::new();
        notifier.notify("a", Severity::Info, t0());

        let json = serde_json::to_string(&notifier).unwrap();
        let mut restored: Notifier = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, notifier);

        // Tokens keep increasing after a round-trip through the session.
        let next = restored.notify("b", Severity::Info, ms(100));
        assert_eq!(next, 1);
    }
}

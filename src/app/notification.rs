//! Transient messages shown over the board.
//!
//! There is at most one notification at a time.  Showing a new one replaces
//! the old one and restarts its timer; the timer is just a deadline checked
//! on every tick.

use std::time::{Duration, Instant};

/// What the message is about; picks its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Check,
    Checkmate,
    Invalid,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// `None` means it stays until dismissed.
    pub expires_at: Option<Instant>,
}

impl Notification {
    pub fn is_sticky(&self) -> bool {
        self.expires_at.is_none()
    }
}

/// Owner of the single notification slot and its delay.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Show a message that clears itself after the configured delay.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            expires_at: Some(now + self.duration),
        });
    }

    /// Show a message that stays until [`Notifier::dismiss`].
    pub fn alert(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            expires_at: None,
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notification once its deadline has passed.
    /// Returns `true` when something was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .and_then(|n| n.expires_at)
            .is_some_and(|at| now >= at);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn has_alert(&self) -> bool {
        self.current.as_ref().is_some_and(Notification::is_sticky)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(2000);

    #[test]
    fn message_expires_after_the_delay() {
        let t0 = Instant::now();
        let mut n = Notifier::new(DELAY);
        n.show("Invalid move", NotificationKind::Invalid, t0);

        assert!(!n.tick(t0 + Duration::from_millis(1999)));
        assert_eq!(n.current().map(|n| n.message.as_str()), Some("Invalid move"));
        assert!(n.tick(t0 + DELAY));
        assert!(n.current().is_none());
    }

    #[test]
    fn showing_again_restarts_the_timer() {
        let t0 = Instant::now();
        let mut n = Notifier::new(DELAY);
        n.show("first", NotificationKind::Info, t0);
        let t1 = t0 + Duration::from_millis(1500);
        n.show("second", NotificationKind::Check, t1);

        assert!(!n.tick(t0 + DELAY));
        assert_eq!(n.current().map(|n| n.kind), Some(NotificationKind::Check));
        assert!(n.tick(t1 + DELAY));
    }

    #[test]
    fn alerts_wait_for_dismissal() {
        let t0 = Instant::now();
        let mut n = Notifier::new(DELAY);
        n.alert("Checkmate", NotificationKind::Checkmate);
        assert!(n.has_alert());
        assert!(!n.tick(t0 + Duration::from_secs(3600)));
        n.dismiss();
        assert!(n.current().is_none());
    }
}

//! Notifications
//!
//! Fire-and-forget notification sink. The storefront raises a notification
//! after each significant action; rendering and delivery are entirely the
//! sink's concern.

use serde::{Deserialize, Serialize};

/// How prominently the notification should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Neutral information.
    Info,

    /// A completed action.
    Success,

    /// A failed action the shopper should correct.
    Error,
}

/// A single notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline
    pub title: String,

    /// Supporting detail
    pub description: String,

    /// Display severity
    pub severity: Severity,
}

impl Notification {
    /// Build an informational notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    /// Build a success notification.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    /// Build an error notification.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for storefront notifications.
pub trait Notifier {
    /// Deliver one notification. Must not fail; delivery problems are the
    /// sink's own concern.
    fn notify(&mut self, notification: Notification);
}

/// A notifier that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        assert_eq!(Notification::info("a", "b").severity, Severity::Info);
        assert_eq!(Notification::success("a", "b").severity, Severity::Success);
        assert_eq!(Notification::error("a", "b").severity, Severity::Error);
    }

    #[test]
    fn noop_notifier_accepts_notifications() {
        let mut notifier = NoopNotifier;

        notifier.notify(Notification::info("Added to cart", "Kettle"));
    }
}

//! Transient user notifications.

use std::time::Duration;

use mockall::automock;
use tracing::{error, info};

/// How long a notification stays on screen before dismissing itself.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The action completed
    Success,

    /// The action failed
    Error,
}

/// A short message shown to the user after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or failure
    pub kind: NotificationKind,

    /// Text shown to the user
    pub message: String,

    /// How long the notification stays visible
    pub dismiss_after: Duration,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            dismiss_after: NOTIFICATION_TIMEOUT,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            dismiss_after: NOTIFICATION_TIMEOUT,
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Shows transient notifications to the user.
#[automock]
pub trait Notifier: Send + Sync {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Notifier that only writes to the log, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(message = %notification.message, "notification"),
            NotificationKind::Error => error!(message = %notification.message, "notification"),
        }
    }
}

use storefront_app::notify::{Notification, NotificationKind, Notifier};
use tracing::debug;

/// Prints notifications as they happen. A terminal has nothing to dismiss, so the
/// timeout is only logged.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    #[expect(
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "notifications are the CLI's user-facing output"
    )]
    fn notify(&self, notification: Notification) {
        debug!(dismiss_after = ?notification.dismiss_after, "notification shown");

        match notification.kind {
            NotificationKind::Success => println!("ok: {}", notification.message),
            NotificationKind::Error => eprintln!("error: {}", notification.message),
        }
    }
}

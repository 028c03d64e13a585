use log::error;
use notify_rust::{Hint, Notification, Timeout};

use crate::reading::NotifyCounts;

const NOTIFICATION_TIMEOUT_MS: u32 = 5000;

/// Sink for user-facing new-mail notifications.
pub trait Notifier {
    /// Dispatch one notification for the given counts and report whether
    /// delivery succeeded. Failures are logged, never escalated; a missed
    /// pop-up is not worth crashing a background monitor over.
    fn notify(&mut self, counts: &NotifyCounts) -> bool;
}

/// Production notifier that goes through the desktop notification bus.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&mut self, counts: &NotifyCounts) -> bool {
        match Notification::new()
            .appname(crate::APP_NAME)
            .summary("New Mail")
            .body(&message_body(counts))
            .icon("mail-message-new")
            .hint(Hint::Category("email.arrived".to_owned()))
            .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
            .show()
        {
            Ok(_) => true,
            Err(err) => {
                error!("could not show notification: {err}");
                false
            }
        }
    }
}

fn message_body(counts: &NotifyCounts) -> String {
    format!(
        "{} new and {} unread mail arrived",
        counts.arrived, counts.newly_unread
    )
}

use crate::domain::model::{NotificationId, Severity};
use async_trait::async_trait;

/// Shows transient, severity-tagged messages to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId;
}

/// Asks the user to accept or refuse an action.
#[async_trait]
pub trait ConfirmationProvider: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// A control that shows a busy state while its request is in flight.
pub trait BusyTarget: Send + Sync {
    fn content(&self) -> String;
    fn set_content(&self, content: &str);
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// Hosts keyed overlays (modals). Opening a key that is already open replaces it.
pub trait OverlayHost: Send + Sync {
    fn open(&self, key: &str, title: &str, body: &str);
    fn close(&self, key: &str);
}

/// An inline element that is either hidden or showing some text.
pub trait DisplayTarget: Send + Sync {
    fn show(&self, content: &str);
    fn hide(&self);
}

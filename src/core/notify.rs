use crate::config::toml_config::NotificationConfig;
use crate::domain::model::{Notification, NotificationId, Severity};
use crate::domain::ports::Notifier;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Where the container is pinned on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopEnd,
    TopStart,
    BottomEnd,
    BottomStart,
}

#[derive(Debug)]
struct Container {
    corner: Corner,
    toasts: Vec<Notification>,
}

impl Container {
    fn prune(&mut self, dismiss_after: Duration) {
        self.toasts
            .retain(|toast| toast.created_at.elapsed() < dismiss_after);
    }
}

#[derive(Debug)]
struct State {
    container: Option<Container>,
    next_id: u64,
}

/// In-process notification surface.
///
/// The container is created on the first `notify` and reused afterwards, so
/// there is never more than one. Toasts stack in creation order, are not
/// deduplicated, and disappear either on `dismiss` or once `dismiss_after`
/// has elapsed.
#[derive(Debug)]
pub struct ToastStack {
    state: Mutex<State>,
    corner: Corner,
    dismiss_after: Duration,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::with_dismiss_after(DEFAULT_DISMISS_AFTER)
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            state: Mutex::new(State {
                container: None,
                next_id: 1,
            }),
            corner: Corner::TopEnd,
            dismiss_after,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::with_dismiss_after(Duration::from_millis(config.dismiss_after_ms))
    }

    pub fn at_corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    pub fn container_count(&self) -> usize {
        self.lock().container.as_ref().map_or(0, |_| 1)
    }

    pub fn corner(&self) -> Option<Corner> {
        self.lock().container.as_ref().map(|c| c.corner)
    }

    /// Toasts still on screen, oldest first. Expired toasts are removed.
    pub fn visible(&self) -> Vec<Notification> {
        let mut state = self.lock();
        match state.container.as_mut() {
            Some(container) => {
                container.prune(self.dismiss_after);
                container.toasts.clone()
            }
            None => Vec::new(),
        }
    }

    /// Removes a toast. Returns false when it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut state = self.lock();
        let Some(container) = state.container.as_mut() else {
            return false;
        };
        let before = container.toasts.len();
        container.toasts.retain(|toast| toast.id != id);
        before != container.toasts.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // a panic while holding the lock leaves the toast list intact
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStack {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId {
        log_notification(message, severity);

        let mut state = self.lock();
        let id = NotificationId(state.next_id);
        state.next_id += 1;

        let corner = self.corner;
        let dismiss_after = self.dismiss_after;
        let container = state.container.get_or_insert_with(|| {
            tracing::debug!("Creating notification container at {:?}", corner);
            Container {
                corner,
                toasts: Vec::new(),
            }
        });
        container.prune(dismiss_after);
        container.toasts.push(Notification {
            id,
            message: message.to_string(),
            severity,
            created_at: Instant::now(),
        });
        id
    }
}

fn log_notification(message: &str, severity: Severity) {
    match severity {
        Severity::Danger => tracing::error!(severity = %severity, "{}", message),
        Severity::Warning => tracing::warn!(severity = %severity, "{}", message),
        Severity::Info | Severity::Success => tracing::info!(severity = %severity, "{}", message),
    }
}

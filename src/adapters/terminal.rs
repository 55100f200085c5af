use crate::domain::model::{NotificationId, Severity};
use crate::domain::ports::{DisplayTarget, Notifier, OverlayHost};
use std::sync::atomic::{AtomicU64, Ordering};

/// Prints notifications to stderr, one line each.
///
/// The printed line is the user-facing output, so the log record is kept at debug.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️",
        Severity::Success => "✅",
        Severity::Warning => "⚠️",
        Severity::Danger => "❌",
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId {
        tracing::debug!(severity = %severity, "{}", message);
        eprintln!("{} {}", icon(severity), message);
        NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Writes overlays to stdout.
#[derive(Debug, Default)]
pub struct TerminalOverlayHost;

impl OverlayHost for TerminalOverlayHost {
    fn open(&self, _key: &str, title: &str, body: &str) {
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count()));
        println!("{}", body);
    }

    fn close(&self, _key: &str) {}
}

/// Writes the display content to stdout; hiding prints nothing.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl DisplayTarget for TerminalDisplay {
    fn show(&self, content: &str) {
        println!("{}", content);
    }

    fn hide(&self) {
        tracing::debug!("Display hidden");
    }
}

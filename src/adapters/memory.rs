use crate::domain::ports::{BusyTarget, DisplayTarget, OverlayHost};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
struct ButtonState {
    content: String,
    enabled: bool,
    history: Vec<String>,
}

/// A button kept in memory. Records every content change.
#[derive(Debug)]
pub struct MemoryButton {
    state: Mutex<ButtonState>,
}

impl MemoryButton {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ButtonState {
                content: content.into(),
                enabled: true,
                history: Vec::new(),
            }),
        }
    }

    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }
}

impl BusyTarget for MemoryButton {
    fn content(&self) -> String {
        lock(&self.state).content.clone()
    }

    fn set_content(&self, content: &str) {
        let mut state = lock(&self.state);
        state.content = content.to_string();
        state.history.push(content.to_string());
    }

    fn set_enabled(&self, enabled: bool) {
        lock(&self.state).enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        lock(&self.state).enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOverlay {
    pub title: String,
    pub body: String,
}

/// Overlays kept by key. Opening an existing key replaces its content.
#[derive(Debug, Default)]
pub struct MemoryOverlayHost {
    open: Mutex<BTreeMap<String, OpenOverlay>>,
}

impl MemoryOverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<OpenOverlay> {
        lock(&self.open).get(key).cloned()
    }

    pub fn open_count(&self) -> usize {
        lock(&self.open).len()
    }
}

impl OverlayHost for MemoryOverlayHost {
    fn open(&self, key: &str, title: &str, body: &str) {
        lock(&self.open).insert(
            key.to_string(),
            OpenOverlay {
                title: title.to_string(),
                body: body.to_string(),
            },
        );
    }

    fn close(&self, key: &str) {
        lock(&self.open).remove(key);
    }
}

/// Inline display kept in memory. `None` means hidden.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    content: Mutex<Option<String>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        lock(&self.content).clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.content).is_some()
    }
}

impl DisplayTarget for MemoryDisplay {
    fn show(&self, content: &str) {
        *lock(&self.content) = Some(content.to_string());
    }

    fn hide(&self) {
        *lock(&self.content) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_replaces_same_key() {
        let host = MemoryOverlayHost::new();
        host.open("expense-details", "Taxi", "first");
        host.open("expense-details", "Hotel", "second");

        assert_eq!(host.open_count(), 1);
        assert_eq!(host.get("expense-details").unwrap().title, "Hotel");

        host.close("expense-details");
        assert_eq!(host.open_count(), 0);
    }

    #[test]
    fn test_display_show_hide() {
        let display = MemoryDisplay::new();
        assert!(!display.is_visible());
        display.show("USD 1.00 = EUR 0.92 (Rate: 0.9200)");
        assert!(display.is_visible());
        display.hide();
        assert!(display.content().is_none());
    }
}

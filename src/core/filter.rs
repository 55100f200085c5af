//! Client-side row filtering for a rendered expense table.
//!
//! This is a stand-in for server-side filtering: it only hides rows that were
//! already rendered. Date-range inputs are accepted and kept but do not filter
//! anything yet.

use crate::config::toml_config::FilterConfig;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Text of the row's status badge.
    pub badge: String,
    pub visible: bool,
}

impl TableRow {
    pub fn new<I, S>(cells: I, badge: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            badge: badge.into(),
            visible: true,
        }
    }

    /// Everything the row renders, cells separated by spaces.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub status: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn matches(&self, row: &TableRow) -> bool {
        let search = self.search.to_lowercase();
        if !search.is_empty() && !row.text().to_lowercase().contains(&search) {
            return false;
        }

        let status = self.status.to_lowercase();
        if !status.is_empty() && !row.badge.to_lowercase().contains(&status) {
            return false;
        }

        true
    }
}

/// Shows matching rows and hides the rest. Returns how many are visible.
pub fn apply_filters(rows: &mut [TableRow], criteria: &FilterCriteria) -> usize {
    if criteria.date_from.is_some() || criteria.date_to.is_some() {
        tracing::debug!(
            "Date range {:?}..{:?} ignored by client-side filter",
            criteria.date_from,
            criteria.date_to
        );
    }

    let mut visible = 0;
    for row in rows.iter_mut() {
        row.visible = criteria.matches(row);
        if row.visible {
            visible += 1;
        }
    }
    visible
}

#[derive(Debug)]
struct FilterState {
    rows: Vec<TableRow>,
    criteria: FilterCriteria,
    generation: u64,
}

impl FilterState {
    fn apply(&mut self) -> usize {
        apply_filters(&mut self.rows, &self.criteria)
    }
}

/// Owns a table and re-filters it as the filter inputs change.
///
/// Search typing is debounced; status and date changes apply immediately.
#[derive(Debug, Clone)]
pub struct FilterController {
    state: Arc<Mutex<FilterState>>,
    debounce: Duration,
}

impl FilterController {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self::with_debounce(rows, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(rows: Vec<TableRow>, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FilterState {
                rows,
                criteria: FilterCriteria::default(),
                generation: 0,
            })),
            debounce,
        }
    }

    pub fn from_config(rows: Vec<TableRow>, config: &FilterConfig) -> Self {
        Self::with_debounce(rows, Duration::from_millis(config.debounce_ms))
    }

    fn lock(&self) -> MutexGuard<'_, FilterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the search text and filters once typing has paused.
    ///
    /// Each call supersedes the pending one; only the last call within the
    /// debounce window filters. Must be called from within a tokio runtime.
    pub fn on_search_input(&self, text: &str) -> JoinHandle<()> {
        let generation = {
            let mut state = self.lock();
            state.criteria.search = text.to_string();
            state.generation += 1;
            state.generation
        };

        let state = Arc::clone(&self.state);
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if state.generation == generation {
                let visible = state.apply();
                tracing::debug!("Search filter applied, {} rows visible", visible);
            }
        })
    }

    pub fn set_status(&self, status: &str) -> usize {
        let mut state = self.lock();
        state.criteria.status = status.to_string();
        state.apply()
    }

    pub fn set_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> usize {
        let mut state = self.lock();
        state.criteria.date_from = from;
        state.criteria.date_to = to;
        state.apply()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.lock().criteria.clone()
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.lock().rows.clone()
    }

    pub fn visible_count(&self) -> usize {
        self.lock().rows.iter().filter(|row| row.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<TableRow> {
        vec![
            TableRow::new(["Taxi to airport", "Travel", "USD 42.50", "Pending"], "Pending"),
            TableRow::new(["Client dinner", "Meals", "EUR 84.50", "Approved"], "Approved"),
            TableRow::new(["Hotel Berlin", "Travel", "EUR 310.00", "Rejected"], "Rejected"),
            TableRow::new(["Airport parking", "Travel", "USD 18.00", "Pending Approval"], "Pending Approval"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut rows = table();
        let criteria = FilterCriteria {
            search: "AIRPORT".to_string(),
            ..Default::default()
        };

        assert_eq!(apply_filters(&mut rows, &criteria), 2);
        assert!(rows[0].visible);
        assert!(!rows[1].visible);
        assert!(!rows[2].visible);
        assert!(rows[3].visible);
    }

    #[test]
    fn test_empty_search_shows_everything() {
        let mut rows = table();
        let narrowing = FilterCriteria {
            search: "hotel".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&mut rows, &narrowing), 1);

        assert_eq!(apply_filters(&mut rows, &FilterCriteria::default()), 4);
        assert!(rows.iter().all(|row| row.visible));
    }

    #[test]
    fn test_status_matches_badge_substring() {
        let mut rows = table();
        let criteria = FilterCriteria {
            status: "pending".to_string(),
            ..Default::default()
        };

        assert_eq!(apply_filters(&mut rows, &criteria), 2);
        assert!(rows[0].visible);
        assert!(rows[3].visible);
    }

    #[test]
    fn test_search_and_status_combine() {
        let mut rows = table();
        let criteria = FilterCriteria {
            search: "travel".to_string(),
            status: "rejected".to_string(),
            ..Default::default()
        };

        assert_eq!(apply_filters(&mut rows, &criteria), 1);
        assert!(rows[2].visible);
    }

    #[test]
    fn test_date_range_has_no_effect() {
        let mut rows = table();
        let criteria = FilterCriteria {
            date_from: NaiveDate::from_ymd_opt(2030, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2030, 12, 31),
            ..Default::default()
        };

        assert_eq!(apply_filters(&mut rows, &criteria), 4);
    }

    #[test]
    fn test_status_change_applies_immediately() {
        let controller = FilterController::new(table());
        assert_eq!(controller.set_status("approved"), 1);
        assert_eq!(controller.visible_count(), 1);
        assert_eq!(controller.set_status(""), 4);
    }

    #[tokio::test]
    async fn test_search_input_is_debounced() {
        let controller = FilterController::with_debounce(table(), Duration::from_millis(50));

        let first = controller.on_search_input("ho");
        let second = controller.on_search_input("hotel");

        // nothing filtered until the pause elapses
        assert_eq!(controller.visible_count(), 4);

        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(controller.criteria().search, "hotel");
        assert_eq!(controller.visible_count(), 1);
        assert!(controller.rows()[2].visible);
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_debounce() {
        let config = FilterConfig { debounce_ms: 10 };
        let controller = FilterController::from_config(table(), &config);
        assert_eq!(controller.debounce, Duration::from_millis(10));

        controller.on_search_input("airport").await.unwrap();
        assert_eq!(controller.visible_count(), 2);
    }

    #[tokio::test]
    async fn test_superseded_search_does_not_apply() {
        let controller = FilterController::with_debounce(table(), Duration::from_millis(30));

        let stale = controller.on_search_input("dinner");
        let latest = controller.on_search_input("");
        stale.await.unwrap();
        latest.await.unwrap();

        assert_eq!(controller.visible_count(), 4);
    }
}

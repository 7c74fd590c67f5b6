//! Search/filter orchestrator
//!
//! Reconciles the search box, the debounce timer, the filter store and the
//! page window into the single query key the listing is fetched with.
//! Search and structured filters are mutually exclusive: a settled search
//! clears the filters, and any active filter takes precedence over the term.

use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::filters::FilterStore;
use super::page::PageWindow;
use super::query::{EffectiveQuery, QueryKey};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug)]
pub struct SearchOrchestrator {
    /// Text currently shown in the search box
    search_input: String,
    /// Last settled search term
    search_term: String,
    debouncer: Debouncer<String>,
    page: PageWindow,
    /// Filter store revision last observed
    seen_filter_revision: u64,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(PageWindow::default().page_size)
    }
}

impl SearchOrchestrator {
    pub fn new(page_size: usize) -> Self {
        Self::with_interval(page_size, SEARCH_DEBOUNCE)
    }

    pub fn with_interval(page_size: usize, interval: Duration) -> Self {
        Self {
            search_input: String::new(),
            search_term: String::new(),
            debouncer: Debouncer::new(interval),
            page: PageWindow::new(page_size),
            seen_filter_revision: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Replace the displayed search text and restart the debounce timer
    pub fn input(&mut self, text: String, now: Instant) {
        self.search_input = text.clone();
        self.debouncer.arm(text, now);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.input(text, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        let mut text = self.search_input.clone();
        if text.pop().is_some() {
            self.input(text, now);
        }
    }

    /// Advance time. When the debounce timer fires the settled text becomes
    /// the effective term, the filters are cleared and the page resets.
    /// Returns true if a search settled.
    pub fn tick(&mut self, now: Instant, filters: &mut FilterStore) -> bool {
        let Some(term) = self.debouncer.poll(now) else {
            return false;
        };

        debug!(term = %term, "search settled");
        self.search_term = term;
        filters.clear_all();
        self.seen_filter_revision = filters.revision();
        self.page.restart();
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────

    /// Observe the filter store; any change sends the listing back to page 1.
    /// Returns true if a change was observed.
    pub fn sync_filters(&mut self, filters: &FilterStore) -> bool {
        if filters.revision() == self.seen_filter_revision {
            return false;
        }
        self.seen_filter_revision = filters.revision();
        self.page.restart();
        true
    }

    /// Empty the filter selection; the search box text is left as is
    pub fn clear_filters(&mut self, filters: &mut FilterStore) {
        filters.clear_all();
        self.sync_filters(filters);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query resolution
    // ─────────────────────────────────────────────────────────────────────────

    pub fn effective_query(&self, filters: &FilterStore) -> EffectiveQuery {
        if filters.is_active() {
            EffectiveQuery::Filter {
                selection: filters.selection().clone(),
            }
        } else {
            EffectiveQuery::Search {
                term: self.search_term.clone(),
            }
        }
    }

    pub fn query_key(&self, filters: &FilterStore) -> QueryKey {
        QueryKey::exercises(
            self.effective_query(filters),
            self.page.page,
            self.page.page_size,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Page window
    // ─────────────────────────────────────────────────────────────────────────

    pub fn page(&self) -> &PageWindow {
        &self.page
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.page.prev_page()
    }

    /// Sizes outside the option set are ignored
    pub fn set_page_size(&mut self, size: usize) {
        self.page.set_page_size(size);
    }

    pub fn cycle_page_size_up(&mut self) {
        self.page.cycle_page_size_up();
    }

    pub fn cycle_page_size_down(&mut self) {
        self.page.cycle_page_size_down();
    }

    /// Record the total reported for the current key
    pub fn apply_total(&mut self, total: usize) -> bool {
        self.page.apply_total(total)
    }

    /// Cancel the pending timer and forget all query state
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
        let page_size = self.page.page_size;
        self.search_input.clear();
        self.search_term.clear();
        self.page = PageWindow::new(page_size);
        self.seen_filter_revision = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exercise::Difficulty;
    use crate::model::filters::FilterSelection;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn typed(orch: &mut SearchOrchestrator, text: &str, start: Instant) {
        for (i, c) in text.chars().enumerate() {
            orch.push_char(c, start + ms(100 * i as u64));
        }
    }

    #[test]
    fn test_no_query_change_before_debounce_elapses() {
        let start = Instant::now();
        let mut filters = FilterStore::new();
        let mut orch = SearchOrchestrator::new(10);
        let initial = orch.query_key(&filters);

        typed(&mut orch, "squat", start);
        let last_key = start + ms(400);

        assert!(!orch.tick(last_key + ms(499), &mut filters));
        assert_eq!(orch.query_key(&filters), initial);
        assert_eq!(orch.search_input(), "squat");

        assert!(orch.tick(last_key + ms(500), &mut filters));
        assert_eq!(
            orch.effective_query(&filters),
            EffectiveQuery::Search {
                term: "squat".to_string()
            }
        );
    }

    #[test]
    fn test_burst_settles_once() {
        let start = Instant::now();
        let mut filters = FilterStore::new();
        let mut orch = SearchOrchestrator::new(10);

        typed(&mut orch, "row", start);
        let mut settled = 0;
        for step in 0..30 {
            if orch.tick(start + ms(100 * step), &mut filters) {
                settled += 1;
            }
        }
        assert_eq!(settled, 1);
        assert_eq!(
            orch.effective_query(&filters),
            EffectiveQuery::Search {
                term: "row".to_string()
            }
        );
    }

    #[test]
    fn test_settled_search_clears_filters_and_resets_page() {
        let start = Instant::now();
        let mut filters = FilterStore::new();
        let mut orch = SearchOrchestrator::new(10);
        filters.set_difficulty(Some(Difficulty::Advanced));
        orch.sync_filters(&filters);
        orch.apply_total(100);
        orch.next_page();
        assert_eq!(orch.page().page, 2);

        orch.push_char('p', start);
        orch.tick(start + ms(500), &mut filters);

        assert!(!filters.is_active());
        assert_eq!(orch.page().page, 1);
        assert_eq!(orch.page().total, 0);
        assert!(!orch.next_page());
        assert!(!orch.effective_query(&filters).is_filter());
    }

    #[test]
    fn test_filter_takes_precedence_over_search() {
        let start = Instant::now();
        let mut filters = FilterStore::new();
        let mut orch = SearchOrchestrator::new(10);
        typed(&mut orch, "press", start);
        orch.tick(start + ms(2000), &mut filters);

        filters.set_muscle_group(Some("Chest".to_string()));
        assert!(orch.sync_filters(&filters));

        assert_eq!(
            orch.effective_query(&filters),
            EffectiveQuery::Filter {
                selection: FilterSelection {
                    muscle_group: Some("Chest".to_string()),
                    difficulty: None,
                    equipment: None,
                }
            }
        );

        orch.clear_filters(&mut filters);
        assert_eq!(
            orch.effective_query(&filters),
            EffectiveQuery::Search {
                term: "press".to_string()
            }
        );
        assert_eq!(orch.search_input(), "press");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut filters = FilterStore::new();
        let mut orch = SearchOrchestrator::new(10);
        orch.apply_total(50);
        orch.next_page();
        orch.next_page();

        filters.set_equipment(Some("Dumbbell".to_string()));
        assert!(orch.sync_filters(&filters));
        assert_eq!(orch.page().page, 1);
        assert!(!orch.sync_filters(&filters));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut orch = SearchOrchestrator::new(10);
        orch.apply_total(500);
        orch.next_page();
        orch.set_page_size(50);
        assert_eq!(orch.page().page, 1);
        let filters = FilterStore::new();
        assert_eq!(orch.query_key(&filters).page_size, 50);
    }

    #[test]
    fn test_teardown_cancels_timer() {
        let start = Instant::now();
        let mut filters = FilterStore::new();
        filters.set_difficulty(Some(Difficulty::Beginner));
        let mut orch = SearchOrchestrator::new(25);
        orch.push_char('x', start);
        orch.teardown();

        assert!(!orch.tick(start + ms(1000), &mut filters));
        assert!(filters.is_active());
        assert_eq!(orch.search_input(), "");
        assert_eq!(orch.page().page_size, 25);
    }

    #[test]
    fn test_backspace_on_empty_does_not_arm() {
        let start = Instant::now();
        let mut orch = SearchOrchestrator::new(10);
        orch.backspace(start);
        assert!(!orch.is_settling());
    }
}

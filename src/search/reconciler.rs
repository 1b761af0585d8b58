//! Debounced thread search and the Listing/Searching view arbitration

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::api::types::{SearchHit, ThreadSearchResult};

/// Which collection is authoritative on the home screen. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Listing,
    Searching,
}

/// Tag carried by a dispatched search; only the latest one may apply results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub query: String,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Server response order
    #[default]
    Relevance,
    /// Score descending, missing scores count as 0
    Score,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Score => "score",
        }
    }
}

/// What the caller must do after [`SearchReconciler::poll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    Dispatch(SearchTicket),
    /// Search view was left; reload the contact listing from offset 0
    ResetToListing,
}

#[derive(Debug, Clone)]
pub struct SearchReconciler {
    query: String,
    /// Time of the last edit not yet acted on
    edited_at: Option<Instant>,
    debounce: Duration,
    mode: ViewMode,
    seq: u64,
    current: Option<SearchTicket>,
    loading: bool,
    results: Vec<ThreadSearchResult>,
    sort: SortOrder,
}

impl SearchReconciler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            edited_at: None,
            debounce,
            mode: ViewMode::Listing,
            seq: 0,
            current: None,
            loading: false,
            results: Vec::new(),
            sort: SortOrder::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_searching(&self) -> bool {
        self.mode == ViewMode::Searching
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn results(&self) -> &[ThreadSearchResult] {
        &self.results
    }

    /// Every edit restarts the debounce window
    pub fn on_query_changed(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.edited_at = Some(now);
    }

    /// When the pending edit becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.edited_at.map(|t| t + self.debounce)
    }

    /// Act on the pending edit once the debounce window has passed
    pub fn poll(&mut self, now: Instant) -> Transition {
        let Some(deadline) = self.next_deadline() else {
            return Transition::None;
        };
        if now < deadline {
            return Transition::None;
        }
        self.edited_at = None;

        if self.query.trim().is_empty() {
            if self.mode == ViewMode::Searching {
                self.leave_search();
                return Transition::ResetToListing;
            }
            return Transition::None;
        }

        self.seq += 1;
        let ticket = SearchTicket {
            query: self.query.clone(),
            seq: self.seq,
        };
        tracing::debug!(query = %ticket.query, seq = ticket.seq, "Dispatching search");
        self.current = Some(ticket.clone());
        self.mode = ViewMode::Searching;
        self.loading = true;
        Transition::Dispatch(ticket)
    }

    /// Forced return to the listing (home, settings close). Clears the query.
    pub fn reset(&mut self) {
        self.query.clear();
        self.edited_at = None;
        self.leave_search();
    }

    fn leave_search(&mut self) {
        self.mode = ViewMode::Listing;
        self.current = None;
        self.loading = false;
        self.results.clear();
    }

    /// Apply a search response. Returns `Ok(false)` when the ticket was superseded.
    pub fn apply_results(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<SearchHit>, ApiError>,
    ) -> Result<bool, ApiError> {
        if self.current.as_ref() != Some(ticket) {
            tracing::debug!(query = %ticket.query, seq = ticket.seq, "Dropping stale results");
            return Ok(false);
        }
        self.loading = false;
        if ticket.query != self.query {
            tracing::debug!(query = %ticket.query, "Query edited since dispatch");
            return Ok(false);
        }

        match result {
            Ok(hits) => {
                self.results = dedup_hits(hits);
                let count = self.results.len();
                tracing::debug!(query = %ticket.query, count, "Search results");
                Ok(true)
            }
            Err(e) => {
                tracing::error!(query = %ticket.query, "Search failed: {}", e);
                Err(e)
            }
        }
    }

    /// Undo a dispatch that could not be queued
    pub fn abandon(&mut self, ticket: &SearchTicket) {
        if self.current.as_ref() == Some(ticket) {
            self.current = None;
            self.loading = false;
        }
    }

    pub fn toggle_sort(&mut self) {
        self.sort = match self.sort {
            SortOrder::Relevance => SortOrder::Score,
            SortOrder::Score => SortOrder::Relevance,
        };
    }

    /// Results in display order. The stored collection is never reordered.
    pub fn displayed(&self) -> Vec<&ThreadSearchResult> {
        let mut view: Vec<&ThreadSearchResult> = self.results.iter().collect();
        match self.sort {
            SortOrder::Relevance => view.sort_by_key(|r| r.original_index),
            SortOrder::Score => view.sort_by(|a, b| {
                b.score
                    .unwrap_or(0.0)
                    .total_cmp(&a.score.unwrap_or(0.0))
            }),
        }
        view
    }
}

/// One entry per thread id; the first occurrence and its response index win
pub fn dedup_hits(hits: Vec<SearchHit>) -> Vec<ThreadSearchResult> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .enumerate()
        .filter(|(_, hit)| seen.insert(hit.thread_id))
        .map(|(index, hit)| ThreadSearchResult::from_hit(hit, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn hit(thread_id: i64, subject: &str, score: Option<f64>) -> SearchHit {
        SearchHit {
            thread_id,
            subject: Some(subject.to_string()),
            sender: None,
            date: None,
            body: None,
            score,
        }
    }

    fn dispatched(transition: Transition) -> SearchTicket {
        match transition {
            Transition::Dispatch(ticket) => ticket,
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_debounce_dispatches_last_query_once() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("a", t0);
        search.on_query_changed("ab", t0 + ms(100));
        search.on_query_changed("abc", t0 + ms(200));

        let mut tickets = Vec::new();
        for step in 0..=20 {
            if let Transition::Dispatch(t) = search.poll(t0 + ms(step * 50)) {
                tickets.push(t);
            }
        }

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].query, "abc");
        assert!(search.is_searching());
        assert!(search.is_loading());
    }

    #[test]
    fn test_keystroke_restarts_window() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("a", t0);
        search.on_query_changed("ab", t0 + ms(400));
        assert_eq!(search.poll(t0 + ms(600)), Transition::None);
        assert_eq!(search.next_deadline(), Some(t0 + ms(900)));
        assert_eq!(dispatched(search.poll(t0 + ms(900))).query, "ab");
    }

    #[test]
    fn test_clearing_query_returns_to_listing() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("acme", t0);
        let ticket = dispatched(search.poll(t0 + DEBOUNCE));
        search
            .apply_results(&ticket, Ok(vec![hit(1, "Hello", Some(1.0))]))
            .unwrap();

        search.on_query_changed("", t0 + ms(1000));
        assert_eq!(search.poll(t0 + ms(1500)), Transition::ResetToListing);
        assert_eq!(search.mode(), ViewMode::Listing);
        assert!(search.results().is_empty());
    }

    #[test]
    fn test_blank_query_in_listing_is_noop() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("   ", t0);
        assert_eq!(search.poll(t0 + DEBOUNCE), Transition::None);
        assert_eq!(search.mode(), ViewMode::Listing);
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("ab", t0);
        let slow = dispatched(search.poll(t0 + DEBOUNCE));
        search.on_query_changed("abc", t0 + ms(600));
        let fast = dispatched(search.poll(t0 + ms(1100)));

        assert!(
            search
                .apply_results(&fast, Ok(vec![hit(2, "abc thread", None)]))
                .unwrap()
        );
        assert!(
            !search
                .apply_results(&slow, Ok(vec![hit(1, "ab thread", None)]))
                .unwrap()
        );

        assert_eq!(search.results().len(), 1);
        assert_eq!(search.results()[0].id, 2);
    }

    #[test]
    fn test_response_after_reset_is_dropped() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("late", t0);
        let ticket = dispatched(search.poll(t0 + DEBOUNCE));
        search.reset();

        let applied = search
            .apply_results(&ticket, Ok(vec![hit(1, "late", None)]))
            .unwrap();
        assert!(!applied);
        assert_eq!(search.mode(), ViewMode::Listing);
        assert!(search.results().is_empty());
        assert_eq!(search.query(), "");
    }

    #[test]
    fn test_response_after_query_cleared_is_dropped() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("ab", t0);
        let ticket = dispatched(search.poll(t0 + DEBOUNCE));
        search.on_query_changed("", t0 + ms(600));

        let applied = search
            .apply_results(&ticket, Ok(vec![hit(1, "ab thread", None)]))
            .unwrap();
        assert!(!applied);
        assert!(search.results().is_empty());
        assert!(!search.is_loading());

        assert_eq!(search.poll(t0 + ms(1100)), Transition::ResetToListing);
        assert_eq!(search.mode(), ViewMode::Listing);
    }

    #[test]
    fn test_failed_search_clears_loading() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);

        search.on_query_changed("x", t0);
        let ticket = dispatched(search.poll(t0 + DEBOUNCE));
        let result = search.apply_results(&ticket, Err(ApiError::Decode("bad".to_string())));

        assert!(result.is_err());
        assert!(!search.is_loading());
        assert!(search.is_searching());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let results = dedup_hits(vec![
            hit(7, "first", Some(0.2)),
            hit(3, "other", Some(0.9)),
            hit(7, "second", Some(0.8)),
            hit(5, "third", None),
        ]);

        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
        assert_eq!(results[0].subject, "first");
        let indices: Vec<usize> = results.iter().map(|r| r.original_index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
    }

    #[test]
    fn test_sort_is_a_projection() {
        let t0 = Instant::now();
        let mut search = SearchReconciler::new(DEBOUNCE);
        search.on_query_changed("q", t0);
        let ticket = dispatched(search.poll(t0 + DEBOUNCE));
        search
            .apply_results(
                &ticket,
                Ok(vec![
                    hit(1, "low", Some(0.1)),
                    hit(2, "none", None),
                    hit(3, "high", Some(0.9)),
                ]),
            )
            .unwrap();

        search.toggle_sort();
        assert_eq!(search.sort(), SortOrder::Score);
        let by_score: Vec<i64> = search.displayed().iter().map(|r| r.id).collect();
        assert_eq!(by_score, vec![3, 1, 2]);

        let stored: Vec<i64> = search.results().iter().map(|r| r.id).collect();
        assert_eq!(stored, vec![1, 2, 3]);

        search.toggle_sort();
        let by_relevance: Vec<i64> = search.displayed().iter().map(|r| r.id).collect();
        assert_eq!(by_relevance, vec![1, 2, 3]);
    }
}

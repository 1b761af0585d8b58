//! Offset-based, append-only contact listing

use super::filter;
use crate::api::ApiError;
use crate::api::types::{Contact, IgnoreEntry};

/// One page fetch, tagged with the listing generation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
    /// Replace the listing instead of appending to it
    pub reset: bool,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied { received: usize },
    /// Response for a request that was superseded; nothing changed
    Stale,
}

/// Owns the loaded contacts and the (offset, has-more) cursor.
///
/// A page shorter than the page size is the only end-of-list signal, and the
/// offset always advances by a full page. Failed fetches leave the listing and
/// the has-more flag untouched.
#[derive(Debug, Clone)]
pub struct PaginationController {
    contacts: Vec<Contact>,
    offset: usize,
    page_size: usize,
    has_more: bool,
    /// Bumped by every reset; older responses are dropped
    generation: u64,
    in_flight: Option<PageRequest>,
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        Self {
            contacts: Vec::new(),
            offset: 0,
            page_size: page_size.max(1),
            has_more: true,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[allow(dead_code)]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[allow(dead_code)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while a reset fetch is pending (the listing is about to be replaced)
    pub fn is_reloading(&self) -> bool {
        self.in_flight.is_some_and(|r| r.reset)
    }

    /// Start over from offset 0. Any page still in flight becomes stale.
    pub fn load_initial(&mut self) -> PageRequest {
        self.generation += 1;
        let request = PageRequest {
            offset: 0,
            limit: self.page_size,
            reset: true,
            generation: self.generation,
        };
        self.in_flight = Some(request);
        tracing::debug!(generation = self.generation, "Reloading contact listing");
        request
    }

    /// Next page at the current offset, unless the end was reached or a fetch is pending
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.has_more || self.in_flight.is_some() {
            return None;
        }
        let request = PageRequest {
            offset: self.offset,
            limit: self.page_size,
            reset: false,
            generation: self.generation,
        };
        self.in_flight = Some(request);
        Some(request)
    }

    /// Whether a selection at `selected` is close enough to the end to fetch more
    pub fn wants_more(&self, selected: usize, threshold: usize) -> bool {
        self.has_more
            && self.in_flight.is_none()
            && selected + threshold >= self.contacts.len()
    }

    pub fn apply_page(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Contact>, ApiError>,
    ) -> Result<PageOutcome, ApiError> {
        if self.in_flight != Some(request) {
            tracing::debug!(
                offset = request.offset,
                generation = request.generation,
                current = self.generation,
                "Dropping stale contacts page"
            );
            return Ok(PageOutcome::Stale);
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(offset = request.offset, "Failed to load contacts: {}", e);
                return Err(e);
            }
        };

        let received = page.len();
        if request.reset {
            self.contacts = page;
        } else {
            self.contacts.extend(page);
        }
        self.has_more = received >= request.limit;
        self.offset = request.offset + request.limit;

        tracing::debug!(
            offset = request.offset,
            received,
            has_more = self.has_more,
            "Applied contacts page"
        );
        Ok(PageOutcome::Applied { received })
    }

    /// The request never reached the actor; free the slot so it can be retried
    pub fn abandon(&mut self, request: PageRequest) {
        if self.in_flight == Some(request) {
            self.in_flight = None;
        }
    }

    /// Apply a new ignore rule to the loaded contacts without refetching.
    /// Offset and has-more are left alone.
    pub fn suppress(&mut self, rule: &IgnoreEntry) -> usize {
        filter::retain_visible(&mut self.contacts, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn contact(id: i64) -> Contact {
        Contact {
            id,
            name: format!("Contact {}", id),
            email: format!("c{}@example.com", id),
            max_score: 0.0,
            thread_count: 0,
            last_active: None,
            first_active: None,
            top_thread_title: None,
            threads: Vec::new(),
        }
    }

    /// Disjoint pages over `total` contacts, like the server's LIMIT/OFFSET query
    fn serve(total: usize, request: PageRequest) -> Vec<Contact> {
        (request.offset..total.min(request.offset + request.limit))
            .map(|i| contact(i as i64))
            .collect()
    }

    #[test]
    fn test_initial_load_replaces_and_advances() {
        let mut pager = PaginationController::new(50);
        let request = pager.load_initial();
        assert_eq!(request.offset, 0);
        assert!(pager.is_reloading());

        let outcome = pager.apply_page(request, Ok(serve(120, request))).unwrap();
        assert_eq!(outcome, PageOutcome::Applied { received: 50 });
        assert_eq!(pager.contacts().len(), 50);
        assert_eq!(pager.offset(), 50);
        assert!(pager.has_more());
        assert!(!pager.is_loading());
    }

    #[test]
    fn test_short_page_ends_listing() {
        let mut pager = PaginationController::new(50);
        let request = pager.load_initial();
        pager.apply_page(request, Ok(serve(30, request))).unwrap();

        assert!(!pager.has_more());
        assert_eq!(pager.offset(), 50);
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn test_load_more_appends() {
        let mut pager = PaginationController::new(2);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(5, first))).unwrap();

        let second = pager.load_more().unwrap();
        assert_eq!(second.offset, 2);
        assert!(!second.reset);
        pager.apply_page(second, Ok(serve(5, second))).unwrap();

        let ids: Vec<i64> = pager.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_failed_fetch_leaves_listing_untouched() {
        let mut pager = PaginationController::new(2);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(10, first))).unwrap();

        let next = pager.load_more().unwrap();
        let result = pager.apply_page(next, Err(ApiError::Decode("truncated".to_string())));

        assert!(result.is_err());
        assert_eq!(pager.contacts().len(), 2);
        assert!(pager.has_more());
        assert_eq!(pager.offset(), 2);
        // Loading indicator is released so the same page can be retried
        assert!(!pager.is_loading());
        assert_eq!(pager.load_more().unwrap().offset, 2);
    }

    #[test]
    fn test_only_one_fetch_in_flight() {
        let mut pager = PaginationController::new(2);
        let first = pager.load_initial();
        assert!(pager.load_more().is_none());
        pager.apply_page(first, Ok(serve(10, first))).unwrap();

        assert!(pager.load_more().is_some());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn test_page_from_before_reset_is_stale() {
        let mut pager = PaginationController::new(2);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(10, first))).unwrap();

        let old = pager.load_more().unwrap();
        let reset = pager.load_initial();

        let outcome = pager.apply_page(old, Ok(serve(10, old))).unwrap();
        assert_eq!(outcome, PageOutcome::Stale);
        assert_eq!(pager.contacts().len(), 2);

        pager.apply_page(reset, Ok(serve(10, reset))).unwrap();
        let ids: Vec<i64> = pager.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_fetch_count_until_exhausted() {
        for page_size in [1usize, 3, 7, 50] {
            for total in [0usize, 1, 2, 6, 7, 49, 50, 51, 149] {
                let mut pager = PaginationController::new(page_size);
                let mut fetches = 0;

                let mut next = Some(pager.load_initial());
                while let Some(request) = next {
                    fetches += 1;
                    pager.apply_page(request, Ok(serve(total, request))).unwrap();
                    next = pager.load_more();
                }

                // A short page ends the listing, so an exact multiple needs one empty page
                assert_eq!(fetches, total / page_size + 1, "N={page_size} T={total}");
                assert!(!pager.has_more());

                let ids: HashSet<i64> = pager.contacts().iter().map(|c| c.id).collect();
                assert_eq!(ids.len(), total);
                assert_eq!(pager.contacts().len(), total);
            }
        }
    }

    #[test]
    fn test_suppress_keeps_cursor() {
        let mut pager = PaginationController::new(3);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(10, first))).unwrap();

        let removed = pager.suppress(&IgnoreEntry::email("c1@example.com"));
        assert_eq!(removed, 1);
        assert_eq!(pager.contacts().len(), 2);
        assert_eq!(pager.offset(), 3);
        assert!(pager.has_more());
    }

    #[test]
    fn test_wants_more_near_end() {
        let mut pager = PaginationController::new(20);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(100, first))).unwrap();

        assert!(!pager.wants_more(0, 5));
        assert!(pager.wants_more(15, 5));
    }

    #[test]
    fn test_abandoned_request_frees_the_slot() {
        let mut pager = PaginationController::new(50);
        let first = pager.load_initial();
        pager.apply_page(first, Ok(serve(120, first))).unwrap();

        let request = pager.load_more().unwrap();
        assert!(pager.load_more().is_none());
        pager.abandon(request);

        assert!(!pager.is_loading());
        assert_eq!(pager.load_more(), Some(request));
        assert_eq!(pager.contacts().len(), 50);
    }
}

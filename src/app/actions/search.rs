//! Thread search actions

use std::time::Instant;

use crate::api::ApiCommand;
use crate::search::Transition;

use super::super::App;

impl App {
    pub(super) fn search_push(&mut self, c: char) {
        let mut query = self.state.search.query().to_string();
        query.push(c);
        self.state.search.on_query_changed(query, Instant::now());
    }

    pub(super) fn search_pop(&mut self) {
        let mut query = self.state.search.query().to_string();
        query.pop();
        self.state.search.on_query_changed(query, Instant::now());
    }

    /// Esc on the results: clearing the query goes through the same debounce path
    pub(super) fn clear_search_query(&mut self) {
        self.state.search.on_query_changed(String::new(), Instant::now());
    }

    /// Run the debounced transition if one is due. Returns true if state changed.
    pub(crate) fn poll_search(&mut self, now: Instant) -> bool {
        match self.state.search.poll(now) {
            Transition::None => false,
            Transition::Dispatch(ticket) => {
                self.state.search_selected = 0;
                self.dispatch(ApiCommand::Search(ticket));
                true
            }
            Transition::ResetToListing => {
                self.state.search_selected = 0;
                self.state.selected = 0;
                self.state.expanded = None;
                self.reload_listing();
                true
            }
        }
    }

    pub(super) fn toggle_sort(&mut self) {
        if !self.state.is_searching() {
            return;
        }
        self.state.search.toggle_sort();
        self.state.search_selected = 0;
        let label = self.state.search.sort().label();
        self.state.set_status(format!("Sorted by {}", label));
    }

    pub(super) fn open_search_result(&mut self) {
        let Some(result) = self.state.selected_search_result() else {
            return;
        };
        let (id, subject) = (result.id, result.subject.clone());
        self.open_thread(id, subject);
    }
}

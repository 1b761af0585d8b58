//! Navigation actions (movement, scrolling)

use crate::app::state::View;
use crate::constants::LOAD_MORE_THRESHOLD;

use super::super::App;

impl App {
    /// Move the selection (or scroll) of the current view by `delta` lines
    pub(crate) fn move_by(&mut self, delta: isize) {
        match self.state.view {
            View::Home if self.state.is_searching() => {
                let len = self.state.search.results().len();
                self.state.search_selected = step(self.state.search_selected, delta, len);
            }
            View::Home => {
                let len = self.state.listing_rows().len();
                self.state.selected = step(self.state.selected, delta, len);
                self.maybe_load_more();
            }
            View::Thread => {
                let scroll = self.state.detail.scroll as isize + delta;
                self.state.detail.scroll = scroll.clamp(0, u16::MAX as isize) as u16;
            }
            View::Settings => {
                let ignore = &mut self.state.ignore;
                for _ in 0..delta.unsigned_abs() {
                    if delta < 0 {
                        ignore.select_prev();
                    } else {
                        ignore.select_next();
                    }
                }
            }
        }
    }

    pub(crate) fn move_to_top(&mut self) {
        match self.state.view {
            View::Home if self.state.is_searching() => self.state.search_selected = 0,
            View::Home => self.state.selected = 0,
            View::Thread => self.state.detail.scroll = 0,
            View::Settings => {
                let len = self.state.ignore.items().len();
                self.move_by(-(len as isize));
            }
        }
    }

    pub(crate) fn move_to_bottom(&mut self) {
        match self.state.view {
            View::Home if self.state.is_searching() => {
                self.state.search_selected = self.state.search.results().len().saturating_sub(1);
            }
            View::Home => {
                self.state.selected = self.state.listing_rows().len().saturating_sub(1);
                self.maybe_load_more();
            }
            View::Thread => {}
            View::Settings => {
                let len = self.state.ignore.items().len();
                self.move_by(len as isize);
            }
        }
    }

    /// Request the next page once the selection nears the end of what is loaded
    fn maybe_load_more(&mut self) {
        let Some(row) = self.state.selected_row() else {
            return;
        };
        if !self
            .state
            .listing
            .wants_more(row.contact_index(), LOAD_MORE_THRESHOLD)
        {
            return;
        }
        if let Some(request) = self.state.listing.load_more() {
            tracing::debug!(offset = request.offset, "Loading more contacts");
            self.dispatch(crate::api::ApiCommand::FetchContacts(request));
        }
    }
}

/// Move `current` by `delta` within `0..len`
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

//! API event handlers
//!
//! Read failures land in the inline error bar. Failed mutations and imports
//! open a notice that has to be dismissed.

use crate::api::ApiError;
use crate::api::types::{
    AiAnalysis, Contact, IgnoreEntry, IgnoreId, IgnoreItem, ImportSummary, Message, SearchHit,
    Stats, ThreadId,
};
use crate::app::state::View;
use crate::contacts::{PageOutcome, PageRequest};
use crate::ignore::IgnoreOrigin;
use crate::search::SearchTicket;

use super::super::App;

impl App {
    pub(crate) fn handle_stats(&mut self, result: Result<Stats, ApiError>) {
        match result {
            Ok(stats) => self.state.total_contacts = Some(stats.contacts),
            Err(e) => {
                tracing::error!("Failed to load stats: {}", e);
                self.state.set_error(format!("Failed to load stats: {}", e));
            }
        }
    }

    pub(crate) fn handle_contacts_page(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Contact>, ApiError>,
    ) {
        match self.state.listing.apply_page(request, result) {
            Ok(PageOutcome::Applied { .. }) => self.state.clamp_listing_selection(),
            Ok(PageOutcome::Stale) => {}
            Err(e) => self.state.set_error(format!("Failed to load contacts: {}", e)),
        }
    }

    pub(crate) fn handle_search_results(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<SearchHit>, ApiError>,
    ) {
        match self.state.search.apply_results(&ticket, result) {
            Ok(true) => {
                let len = self.state.search.results().len();
                self.state.search_selected = self.state.search_selected.min(len.saturating_sub(1));
            }
            Ok(false) => {}
            Err(e) => self.state.set_error(format!("Search failed: {}", e)),
        }
    }

    pub(crate) fn handle_thread_messages(
        &mut self,
        thread_id: ThreadId,
        result: Result<Vec<Message>, ApiError>,
    ) {
        if let Err(e) = self.state.detail.apply_messages(thread_id, result) {
            self.state.set_error(format!("Failed to load messages: {}", e));
        }
    }

    pub(crate) fn handle_thread_summary(
        &mut self,
        thread_id: ThreadId,
        result: Result<AiAnalysis, ApiError>,
    ) {
        if let Err(e) = self.state.detail.apply_analysis(thread_id, result) {
            self.state.set_error(format!("AI analysis failed: {}", e));
        }
    }

    /// Feeds the settings panel when it is open, and any export waiting on the list
    pub(crate) fn handle_ignore_list(&mut self, result: Result<Vec<IgnoreItem>, ApiError>) {
        let pending_export = self.pending_export.take();

        let result = if self.state.view == View::Settings {
            self.state
                .ignore
                .apply_list(result)
                .map(|()| self.state.ignore.items().to_vec())
        } else {
            result
        };

        match result {
            Ok(items) => {
                if let Some(dir) = pending_export {
                    self.write_export(&dir, &items);
                }
            }
            Err(e) => self.state.set_error(format!("Failed to load ignore list: {}", e)),
        }
    }

    pub(crate) fn handle_ignore_added(
        &mut self,
        entry: IgnoreEntry,
        origin: IgnoreOrigin,
        result: Result<IgnoreItem, ApiError>,
    ) {
        let result = if origin == IgnoreOrigin::Settings && self.state.view == View::Settings {
            self.state.ignore.apply_added(result).map(|refresh| {
                self.dispatch(refresh);
            })
        } else {
            result.map(|_| ())
        };

        match result {
            Ok(()) => {
                self.suppress_in_listing(&entry);
                self.refresh_stats();
                self.state
                    .set_status(format!("Ignored {} {}", entry.kind, entry.value));
            }
            Err(e) => {
                tracing::warn!(value = %entry.value, ?origin, "Ignore rejected: {}", e);
                self.state.show_notice("Error", mutation_failure(&e, &entry.value));
            }
        }
    }

    pub(crate) fn handle_ignore_removed(&mut self, id: IgnoreId, result: Result<(), ApiError>) {
        let result = if self.state.view == View::Settings {
            self.state.ignore.apply_removed(id, result).map(|refresh| {
                self.dispatch(refresh);
            })
        } else {
            result
        };

        match result {
            Ok(()) => self.state.set_status("Ignore entry removed"),
            Err(e) => {
                self.state
                    .show_notice("Error", format!("Failed to remove entry: {}", e));
            }
        }
    }

    /// Counts are shown exactly as the server reported them
    pub(crate) fn handle_ignore_imported(
        &mut self,
        items: Vec<IgnoreEntry>,
        result: Result<ImportSummary, ApiError>,
    ) {
        match self.state.ignore.apply_imported(result) {
            Ok((summary, refresh)) => {
                if self.state.view == View::Settings {
                    self.dispatch(refresh);
                }
                for entry in &items {
                    self.suppress_in_listing(entry);
                }
                self.refresh_stats();
                self.state.show_notice(
                    "Import",
                    format!("Added: {}, Skipped: {}", summary.added, summary.skipped),
                );
            }
            Err(e) => self.state.show_notice("Import failed", e.to_string()),
        }
    }
}

/// Notice text for a failed add: duplicates come back as rejections
fn mutation_failure(error: &ApiError, value: &str) -> String {
    if error.is_rejection() {
        format!("Failed or duplicate: {}", value)
    } else {
        format!("Failed to ignore {}: {}", value, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_failure_text() {
        let duplicate = ApiError::Rejected {
            status: 400,
            detail: "Entry already exists".to_string(),
        };
        assert_eq!(
            mutation_failure(&duplicate, "spam.com"),
            "Failed or duplicate: spam.com"
        );

        let decode = ApiError::Decode("bad json".to_string());
        assert!(mutation_failure(&decode, "spam.com").starts_with("Failed to ignore spam.com"));
    }
}

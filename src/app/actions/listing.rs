//! Contact listing actions (reload, expand, inline ignore)

use crate::api::ApiCommand;
use crate::api::types::{IgnoreEntry, IgnoreKind};
use crate::app::state::{ListingRow, ModalState, View};
use crate::ignore::IgnoreOrigin;

use super::super::App;

impl App {
    /// Fetch the first page again; the current listing stays until it arrives
    pub(crate) fn reload_listing(&mut self) {
        let request = self.state.listing.load_initial();
        self.dispatch(ApiCommand::FetchContacts(request));
    }

    pub(crate) fn refresh_stats(&mut self) {
        self.dispatch(ApiCommand::FetchStats);
    }

    /// Back to a fresh listing from anywhere: query cleared, paging from offset 0
    pub(crate) fn go_home(&mut self) {
        self.state.search.reset();
        self.state.search_selected = 0;
        if self.state.view == View::Settings {
            self.state.ignore.close();
        }
        self.state.view = View::Home;
        self.state.modal = ModalState::None;
        self.state.selected = 0;
        self.state.expanded = None;
        self.reload_listing();
        self.refresh_stats();
    }

    /// Enter on a listing row: contacts expand/collapse, stubs open their thread
    pub(super) fn open_listing_row(&mut self) {
        match self.state.selected_row() {
            Some(ListingRow::Contact(_)) => self.state.toggle_expansion(),
            Some(ListingRow::Stub { contact, stub }) => {
                let Some(thread) = self
                    .state
                    .listing
                    .contacts()
                    .get(contact)
                    .and_then(|c| c.threads.get(stub))
                else {
                    return;
                };
                let (id, subject) = (thread.id, thread.subject.clone());
                self.open_thread(id, subject);
            }
            None => {}
        }
    }

    /// Ignore the selected contact by exact email or by its domain
    pub(super) fn ignore_selected_contact(&mut self, kind: IgnoreKind) {
        if self.state.view != View::Home || self.state.is_searching() {
            return;
        }
        let Some(contact) = self.state.selected_contact() else {
            return;
        };
        let email = contact.email.clone();
        let domain = contact.domain().map(str::to_string);

        let entry = match (kind, domain) {
            (IgnoreKind::Email, _) => IgnoreEntry::email(email),
            (IgnoreKind::Domain, Some(domain)) => IgnoreEntry::domain(domain),
            (IgnoreKind::Domain, None) => {
                self.state
                    .set_error(format!("{} has no domain to ignore", email));
                return;
            }
        };

        self.state.set_status(format!("Ignoring {} {}...", entry.kind, entry.value));
        self.dispatch(ApiCommand::AddIgnore {
            entry,
            origin: IgnoreOrigin::Listing,
        });
    }

    /// Drop contacts matching `entry` from the loaded listing
    pub(crate) fn suppress_in_listing(&mut self, entry: &IgnoreEntry) {
        let removed = self.state.listing.suppress(entry);
        if removed > 0 {
            tracing::debug!(value = %entry.value, removed, "Suppressed contacts");
            self.state.clamp_listing_selection();
        }
    }
}

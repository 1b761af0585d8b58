//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use std::time::{Duration, Instant};

use crate::api::ApiCommand;
use crate::api::types::{Contact, ContactId, ThreadSearchResult};
use crate::command::{CommandHelp, CommandResult};
use crate::constants::ERROR_TTL_SECS;
use crate::contacts::PaginationController;
use crate::detail::ThreadDetail;
use crate::ignore::IgnoreListStore;
use crate::input::KeybindingEntry;
use crate::search::SearchReconciler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Contact listing, or thread search results while a query is active
    #[default]
    Home,
    Thread,
    Settings,
}

/// Modal overlay state - only one can be active at a time
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    /// Editing the search query
    Search,
    Command {
        input: String,
        result: Option<CommandResult>,
    },
    /// Path prompt for importing an ignore list
    ImportPath { input: String },
    Help {
        keybindings: Vec<KeybindingEntry>,
        commands: Vec<CommandHelp>,
        scroll: usize,
    },
    /// Blocking message that must be dismissed
    Notice { title: String, message: String },
}

impl ModalState {
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search)
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }

    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Notice { .. })
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notice {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Get command input if in command mode
    pub fn command_input(&self) -> Option<&str> {
        match self {
            Self::Command { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Get command result if in command mode
    pub fn command_result(&self) -> Option<&CommandResult> {
        match self {
            Self::Command { result, .. } => result.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub error: Option<String>,
    pub error_time: Option<Instant>,
    pub message: String,
    /// Persists after error bar expires - shown as indicator in header
    pub has_unacknowledged_error: bool,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(Instant::now());
        self.has_unacknowledged_error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Call this on user input to dismiss the header indicator
    pub fn acknowledge_error(&mut self) {
        self.has_unacknowledged_error = false;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

/// Which part of the settings panel has keyboard focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsFocus {
    #[default]
    List,
    Input,
}

/// One visible line of the contact listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRow {
    Contact(usize),
    /// A thread stub under the expanded contact
    Stub { contact: usize, stub: usize },
}

impl ListingRow {
    pub fn contact_index(self) -> usize {
        match self {
            Self::Contact(i) | Self::Stub { contact: i, .. } => i,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub modal: ModalState,
    pub status: StatusState,

    // Contact listing
    pub listing: PaginationController,
    /// Index into [`AppState::listing_rows`]
    pub selected: usize,
    pub expanded: Option<ContactId>,
    /// Total from `/stats`; eventually consistent with the listing
    pub total_contacts: Option<u64>,

    // Thread search
    pub search: SearchReconciler,
    pub search_selected: usize,

    pub detail: ThreadDetail,

    // Settings panel
    pub ignore: IgnoreListStore,
    pub settings_focus: SettingsFocus,
}

impl AppState {
    pub fn new(page_size: usize, search_debounce: Duration) -> Self {
        Self {
            view: View::default(),
            modal: ModalState::default(),
            status: StatusState::default(),
            listing: PaginationController::new(page_size),
            selected: 0,
            expanded: None,
            total_contacts: None,
            search: SearchReconciler::new(search_debounce),
            search_selected: 0,
            detail: ThreadDetail::default(),
            ignore: IgnoreListStore::default(),
            settings_focus: SettingsFocus::default(),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    /// Roll back the loading flag a command set before it failed to queue
    pub fn abandon(&mut self, cmd: &ApiCommand) {
        match cmd {
            ApiCommand::FetchContacts(request) => self.listing.abandon(*request),
            ApiCommand::Search(ticket) => self.search.abandon(ticket),
            ApiCommand::OpenThread { thread_id } => self.detail.abandon(*thread_id),
            ApiCommand::ListIgnore
            | ApiCommand::AddIgnore { .. }
            | ApiCommand::RemoveIgnore { .. }
            | ApiCommand::ImportIgnore { .. } => self.ignore.abandon(cmd),
            ApiCommand::FetchStats | ApiCommand::Shutdown => {}
        }
    }

    /// Header counter: `loaded / total`, or `-` while the search view is up
    pub fn counter_label(&self) -> String {
        if self.is_searching() {
            return "-".to_string();
        }
        match self.total_contacts {
            Some(total) => format!("{} / {}", self.listing.contacts().len(), total),
            None => format!("{} / ?", self.listing.contacts().len()),
        }
    }

    pub fn listing_rows(&self) -> Vec<ListingRow> {
        let mut rows = Vec::with_capacity(self.listing.contacts().len());
        for (i, contact) in self.listing.contacts().iter().enumerate() {
            rows.push(ListingRow::Contact(i));
            if self.expanded == Some(contact.id) {
                rows.extend(
                    (0..contact.threads.len()).map(|stub| ListingRow::Stub { contact: i, stub }),
                );
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<ListingRow> {
        self.listing_rows().get(self.selected).copied()
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        let row = self.selected_row()?;
        self.listing.contacts().get(row.contact_index())
    }

    pub fn is_expanded(&self, contact: &Contact) -> bool {
        self.expanded == Some(contact.id)
    }

    /// Expand the selected contact (collapsing any other), or collapse it if already open
    pub fn toggle_expansion(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let index = row.contact_index();
        let Some(id) = self.listing.contacts().get(index).map(|c| c.id) else {
            return;
        };

        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
        self.select_contact(index);
    }

    pub fn collapse(&mut self) {
        if let Some(row) = self.selected_row() {
            self.expanded = None;
            self.select_contact(row.contact_index());
        }
    }

    fn select_contact(&mut self, index: usize) {
        self.selected = self
            .listing_rows()
            .iter()
            .position(|r| *r == ListingRow::Contact(index))
            .unwrap_or(0);
    }

    /// Keep selection and expansion valid after the listing changed underneath
    pub fn clamp_listing_selection(&mut self) {
        if let Some(id) = self.expanded
            && !self.listing.contacts().iter().any(|c| c.id == id)
        {
            self.expanded = None;
        }
        let rows = self.listing_rows().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    pub fn selected_search_result(&self) -> Option<&ThreadSearchResult> {
        self.search.displayed().get(self.search_selected).copied()
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn acknowledge_error(&mut self) {
        self.status.acknowledge_error();
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }

    /// Blocking notice for rejected mutations and bad import files
    pub fn show_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = ModalState::notice(title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{IgnoreEntry, ThreadStub};
    use crate::contacts::PageRequest;
    use crate::search::Transition;

    fn contact(id: i64, stubs: usize) -> Contact {
        Contact {
            id,
            name: format!("Contact {}", id),
            email: format!("c{}@example.com", id),
            max_score: 0.0,
            thread_count: stubs as u32,
            last_active: None,
            first_active: None,
            top_thread_title: None,
            threads: (0..stubs)
                .map(|i| ThreadStub {
                    id: id * 100 + i as i64,
                    subject: format!("Thread {}", i),
                    score: 0.0,
                    last_message_at: String::new(),
                    message_count: 1,
                })
                .collect(),
        }
    }

    fn state_with(contacts: Vec<Contact>) -> AppState {
        let mut state = AppState::new(50, Duration::from_millis(500));
        let request: PageRequest = state.listing.load_initial();
        state.listing.apply_page(request, Ok(contacts)).unwrap();
        state
    }

    #[test]
    fn test_expansion_inserts_stub_rows() {
        let mut state = state_with(vec![contact(1, 2), contact(2, 0)]);
        assert_eq!(state.listing_rows().len(), 2);

        state.toggle_expansion();
        assert_eq!(
            state.listing_rows(),
            vec![
                ListingRow::Contact(0),
                ListingRow::Stub { contact: 0, stub: 0 },
                ListingRow::Stub { contact: 0, stub: 1 },
                ListingRow::Contact(1),
            ]
        );

        state.selected = 2;
        assert_eq!(state.selected_contact().map(|c| c.id), Some(1));

        state.collapse();
        assert_eq!(state.selected, 0);
        assert_eq!(state.listing_rows().len(), 2);
    }

    #[test]
    fn test_only_one_contact_expanded() {
        let mut state = state_with(vec![contact(1, 1), contact(2, 1)]);
        state.toggle_expansion();
        state.selected = 2;
        state.toggle_expansion();

        assert_eq!(state.expanded, Some(2));
        assert_eq!(state.selected_row(), Some(ListingRow::Contact(1)));
    }

    #[test]
    fn test_clamp_after_suppression() {
        let mut state = state_with(vec![contact(1, 1), contact(2, 0)]);
        state.selected = 1;
        state.toggle_expansion();
        assert_eq!(state.expanded, Some(2));

        state
            .listing
            .suppress(&IgnoreEntry::email("c2@example.com"));
        state.clamp_listing_selection();

        assert_eq!(state.expanded, None);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_counter_label() {
        let mut state = state_with(vec![contact(1, 0), contact(2, 0)]);
        assert_eq!(state.counter_label(), "2 / ?");
        state.total_contacts = Some(120);
        assert_eq!(state.counter_label(), "2 / 120");

        let t0 = Instant::now();
        state.search.on_query_changed("acme", t0);
        state.search.poll(t0 + Duration::from_secs(1));
        assert_eq!(state.counter_label(), "-");
    }

    #[test]
    fn test_error_ttl() {
        let mut status = StatusState::default();
        status.set_error("boom");
        assert!(!status.clear_error_if_expired());
        status.error_time = Some(Instant::now() - Duration::from_secs(ERROR_TTL_SECS + 1));
        assert!(status.clear_error_if_expired());
        assert!(status.error.is_none());
        assert!(status.has_unacknowledged_error);
    }

    #[test]
    fn test_abandon_clears_loading_flags() {
        let mut state = state_with((0..50).map(|i| contact(i, 0)).collect());

        let request = state.listing.load_more().unwrap();
        state.abandon(&ApiCommand::FetchContacts(request));
        assert!(!state.listing.is_loading());
        assert!(state.listing.load_more().is_some());

        let t0 = Instant::now();
        state.search.on_query_changed("acme", t0);
        let Transition::Dispatch(ticket) = state.search.poll(t0 + Duration::from_millis(500))
        else {
            panic!("expected a dispatch");
        };
        assert!(state.search.is_loading());
        state.abandon(&ApiCommand::Search(ticket));
        assert!(!state.search.is_loading());

        for c in "spam.com".chars() {
            state.ignore.push_input(c);
        }
        let add = state.ignore.add().unwrap();
        assert!(state.ignore.is_busy());
        state.abandon(&add);
        assert!(!state.ignore.is_busy());
        assert_eq!(state.ignore.input(), "spam.com");

        let list = state.ignore.list();
        state.abandon(&list);
        assert!(!state.ignore.is_loading());
    }
}

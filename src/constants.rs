//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers to make them discoverable and configurable.

/// Number of contacts requested per page.
/// A page shorter than this is the only end-of-list signal from the server.
pub const CONTACT_PAGE_SIZE: usize = 50;

/// Maximum number of search hits requested per query.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Quiet period after the last keystroke before a search is dispatched.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Load the next page when the selection is this close to the end of the listing.
pub const LOAD_MORE_THRESHOLD: usize = 10;

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Capacity of the API actor's command and event channels.
pub const API_CHANNEL_CAPACITY: usize = 64;

/// Prefix of exported ignore list files; a `YYYYMMDDHHmm` stamp follows.
pub const EXPORT_FILE_PREFIX: &str = "IgnoredContacts_";

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

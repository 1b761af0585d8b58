//! Event handlers for the application
//!
//! This module contains focused handler methods extracted from the event loop
//! for better organization and testability.

mod api;

// Handler methods are implemented directly on App via api.rs

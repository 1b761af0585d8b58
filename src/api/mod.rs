//! Access to the PastLead REST API
//!
//! The scoring, search and AI analysis all happen server-side; this module only
//! moves typed requests and responses:
//! - `ApiClient` maps each endpoint to a typed async call
//! - the API actor runs those calls off the UI task and reports tagged events

mod actor;
mod client;
mod error;
pub mod types;

pub use actor::{ApiActorHandle, ApiCommand, ApiEvent, spawn_api_actor};
pub use client::ApiClient;
pub use error::ApiError;

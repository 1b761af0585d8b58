//! Contact listing: paging and local suppression

pub mod filter;
mod pagination;

pub use pagination::{PageOutcome, PageRequest, PaginationController};

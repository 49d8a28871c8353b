//! GitHub pull-request extraction
//!
//! Fetches the first page of a repository's pull requests and projects each
//! one onto the fields exported to CSV.

mod client;
mod types;

pub use client::{FetchOutcome, PullRequestClient, ACCEPT_MEDIA_TYPE, USER_AGENT};
pub use types::{partition_by_state, PrState, PullRequestRecord, StateFilter};

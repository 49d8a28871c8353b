//! Output module for exported data and run artifacts
//!
//! This module handles:
//! - Serializing records into CSV with a uniform quoting rule
//! - Writing artifacts to disk and reading them back for verification
//! - The pull-request export layout

mod csv;
mod files;
mod pull_requests;

pub use self::csv::{to_csv, CsvDocument};
pub use files::{read_file, write_file};
pub use pull_requests::{
    export_pull_requests, pull_request_document, verify_round_trip, PR_HEADER,
    PR_HEADER_WITH_STATE,
};

/// File names of the artifacts written under the output directory
pub mod artifacts {
    pub const ALL_PULL_REQUESTS: &str = "all-pull-requests.csv";
    pub const SAMPLE_PULL_REQUESTS: &str = "sample-pull-requests.csv";
    pub const MOCK_PULL_REQUESTS: &str = "mock-pull-requests.csv";
    pub const BEFORE_LOGIN: &str = "before-login.html";
    pub const AFTER_LOGIN: &str = "after-login.html";
}

//! FashionHub end-to-end checks
//!
//! This crate drives the FashionHub sample shop over HTTP to validate page load,
//! navigation, link health and login behaviour, and extracts pull-request
//! metadata from the GitHub REST API into CSV files.

pub mod audit;
pub mod browser;
pub mod config;
pub mod github;
pub mod output;
pub mod scenarios;
pub mod url;

use thiserror::Error;

/// Main error type for FashionHub end-to-end operations
#[derive(Debug, Error)]
pub enum E2eError {
    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("GitHub API request failed: {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("No element matches {selector} on {url}")]
    ElementNotFound { selector: String, url: String },

    #[error("Timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV row {row} has {found} fields, header has {expected}")]
    CsvShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Check failed: {0}")]
    Assertion(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Base URL has no host: {0}")]
    MissingHost(String),

    #[error("Cannot resolve {href} against {base}")]
    Unresolvable { href: String, base: String },
}

/// Result type alias for end-to-end operations
pub type Result<T> = std::result::Result<T, E2eError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{audit_links, AuditReport, AuditSummary, LinkCheckResult};
pub use config::Settings;
pub use github::{FetchOutcome, PullRequestClient, PullRequestRecord};
pub use output::CsvDocument;
pub use url::resolve_url;

//! Link audit module
//!
//! This module contains the link status validation logic:
//! - Resolving every anchor of a page to an absolute URL
//! - Issuing one GET per link, sequentially in document order
//! - Classifying each response by status code
//! - Summarizing the results for reporting and assertions

mod auditor;
mod fetcher;
mod summary;

pub use auditor::{audit_links, audit_links_with, AuditReport, LinkCheckResult};
pub use fetcher::{build_http_client, FetchFailure, HttpLinkFetcher, LinkFetcher};
pub use summary::AuditSummary;

/// Returns true if a status code counts as a healthy link (200..400)
pub fn is_success_status(status: u16) -> bool {
    (200..400).contains(&status)
}

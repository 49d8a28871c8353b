//! Link auditor
//!
//! Checks every anchor of a single page. Transport failures are recorded as
//! data so that one broken link never aborts the audit.

use crate::audit::fetcher::LinkFetcher;
use crate::audit::summary::AuditSummary;
use crate::audit::is_success_status;
use crate::url::resolve_url;
use crate::{E2eError, UrlError, UrlResult};
use url::Url;

/// Outcome of checking one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheckResult {
    /// Absolute URL that was requested
    pub url: String,

    /// HTTP status code, or 0 if no response was received
    pub status: u16,

    /// True when `status` is in 200..400
    pub success: bool,
}

impl LinkCheckResult {
    /// Creates a result from a received status code
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            success: is_success_status(status),
        }
    }

    /// Creates a result for a link that produced no response
    pub fn unreachable(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }

    /// Returns true if no response was received
    pub fn is_unreachable(&self) -> bool {
        self.status == 0
    }

    /// Returns true if the server answered with a 4xx or 5xx code
    pub fn is_http_error(&self) -> bool {
        self.status >= 400
    }
}

/// Results of a single page audit, in document order
#[derive(Debug, Clone)]
pub struct AuditReport {
    results: Vec<LinkCheckResult>,
    summary: AuditSummary,
}

impl AuditReport {
    pub fn new(results: Vec<LinkCheckResult>) -> Self {
        let summary = AuditSummary::from_results(&results);
        Self { results, summary }
    }

    pub fn results(&self) -> &[LinkCheckResult] {
        &self.results
    }

    pub fn summary(&self) -> &AuditSummary {
        &self.summary
    }

    /// Links that answered with a status >= 400
    pub fn http_errors(&self) -> impl Iterator<Item = &LinkCheckResult> {
        self.results.iter().filter(|r| r.is_http_error())
    }

    /// Links that produced no response at all
    pub fn unreachable(&self) -> impl Iterator<Item = &LinkCheckResult> {
        self.results.iter().filter(|r| r.is_unreachable())
    }

    /// Every link outside 200..400
    pub fn failures(&self) -> impl Iterator<Item = &LinkCheckResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Logs the summary block
    pub fn log_summary(&self) {
        for line in self.summary.to_string().lines() {
            tracing::info!("{}", line);
        }
    }

    /// Fails if any link is outside 200..400
    ///
    /// The error lists every failing link with its status; unreachable links
    /// are reported with status 0.
    pub fn ensure_healthy(&self) -> Result<(), E2eError> {
        let failures: Vec<String> = self
            .failures()
            .map(|r| format!("{} ({})", r.url, r.status))
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        Err(E2eError::Assertion(format!(
            "{} of {} links failed ({} HTTP errors, {} unreachable): {}",
            failures.len(),
            self.summary.total,
            self.http_errors().count(),
            self.unreachable().count(),
            failures.join(", ")
        )))
    }
}

/// Audits the links of a page
///
/// # Process
///
/// For each entry, in order:
/// 1. Skip it if it has no href value (missing or empty); a whitespace-only
///    href is kept and resolves to the page itself
/// 2. Resolve it against `base_url` (see [`resolve_url`])
/// 3. GET it through `fetcher`, one request at a time
/// 4. Record `success = 200 <= status < 400`; a transport failure or an
///    unresolvable href is recorded with status 0
///
/// # Arguments
///
/// * `hrefs` - Raw `href` attribute values in document order
/// * `base_url` - Absolute URL of the page the links came from
/// * `fetcher` - Issues the GET requests
///
/// # Returns
///
/// * `Ok(AuditReport)` - All links were checked
/// * `Err(E2eError)` - `base_url` is not an absolute URL
pub async fn audit_links<F: LinkFetcher>(
    hrefs: &[Option<String>],
    base_url: &str,
    fetcher: &F,
) -> Result<AuditReport, E2eError> {
    audit_links_with(hrefs, base_url, fetcher, resolve_url).await
}

/// Audits the links of a page using a custom href resolver
///
/// Same process as [`audit_links`], with `resolve` turning each raw href into
/// the absolute URL to request.
pub async fn audit_links_with<F, R>(
    hrefs: &[Option<String>],
    base_url: &str,
    fetcher: &F,
    resolve: R,
) -> Result<AuditReport, E2eError>
where
    F: LinkFetcher,
    R: Fn(&str, &str) -> UrlResult<String>,
{
    Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))?;

    let mut results = Vec::new();

    for href in hrefs.iter().flatten() {
        if href.is_empty() {
            continue;
        }

        let absolute_url = match resolve(href.as_str(), base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("✗ {} - Error: {}", href, e);
                results.push(LinkCheckResult::unreachable(href));
                continue;
            }
        };

        let result = match fetcher.fetch_status(&absolute_url).await {
            Ok(status) => {
                let result = LinkCheckResult::new(absolute_url, status);
                if result.success {
                    tracing::info!("✓ {} - Status: {}", result.url, status);
                } else {
                    tracing::warn!("✗ {} - Status: {}", result.url, status);
                }
                result
            }
            Err(e) => {
                tracing::warn!("✗ {} - Error: {}", absolute_url, e);
                LinkCheckResult::unreachable(absolute_url)
            }
        };

        results.push(result);
    }

    Ok(AuditReport::new(results))
}

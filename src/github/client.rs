//! Pulls endpoint client
//!
//! Issues a single `GET {api}/{repo}/pulls` request. HTTP 403 is treated as
//! rate-limit exhaustion and returned as data so callers can skip instead of
//! failing; any other non-2xx status is an error.

use crate::audit::build_http_client;
use crate::config::Settings;
use crate::github::types::{ApiPullRequest, PullRequestRecord, StateFilter};
use crate::E2eError;
use reqwest::header::{ACCEPT, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client, StatusCode};

/// Versioned JSON media type requested from the API
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// The API rejects requests without a user agent
pub const USER_AGENT: &str = "FashionHub-Test-Automation";

/// Result of a pulls request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The first page of pull requests
    Records(Vec<PullRequestRecord>),

    /// The API answered 403; treat as an expected, skippable condition
    RateLimited,
}

impl FetchOutcome {
    /// Returns the records, or None when rate limited
    pub fn into_records(self) -> Option<Vec<PullRequestRecord>> {
        match self {
            Self::Records(records) => Some(records),
            Self::RateLimited => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Client for the repository pulls endpoint
#[derive(Debug, Clone)]
pub struct PullRequestClient {
    client: Client,
    api_base: String,
}

impl PullRequestClient {
    /// Creates a client for the given API base (e.g. `https://api.github.com/repos`)
    pub fn new(api_base: impl Into<String>) -> Result<Self, E2eError> {
        Ok(Self::with_client(build_http_client(USER_AGENT)?, api_base))
    }

    /// Creates a client reusing an existing HTTP client
    pub fn with_client(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Creates a client for the API configured in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, E2eError> {
        Self::new(settings.github_api_url.clone())
    }

    /// Builds the request URL for a repository's pulls
    ///
    /// # Example
    ///
    /// ```
    /// use fashionhub_e2e::github::{PullRequestClient, StateFilter};
    ///
    /// let client = PullRequestClient::new("https://api.github.com/repos").unwrap();
    /// assert_eq!(
    ///     client.pulls_url("appwrite/appwrite", StateFilter::Open, 100),
    ///     "https://api.github.com/repos/appwrite/appwrite/pulls?state=open&per_page=100"
    /// );
    /// ```
    pub fn pulls_url(&self, repo: &str, state: StateFilter, per_page: u32) -> String {
        format!(
            "{}/{}/pulls?state={}&per_page={}",
            self.api_base.trim_end_matches('/'),
            repo.trim_matches('/'),
            state.as_str(),
            per_page
        )
    }

    /// Fetches the first page of pull requests
    ///
    /// # Response Handling
    ///
    /// | Status | Result |
    /// |--------|--------|
    /// | 2xx | `Records`, after schema validation |
    /// | 403 | `RateLimited` |
    /// | other | `E2eError::Api` with status code and reason |
    ///
    /// # Arguments
    ///
    /// * `repo` - Repository in `owner/name` form
    /// * `state` - Which pull requests to list
    /// * `per_page` - Page size; only the first page is requested
    pub async fn fetch_pull_requests(
        &self,
        repo: &str,
        state: StateFilter,
        per_page: u32,
    ) -> Result<FetchOutcome, E2eError> {
        let url = self.pulls_url(repo, state, per_page);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .send()
            .await
            .map_err(|source| E2eError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            tracing::warn!("GitHub API rate limit exceeded; skipping to avoid blocking CI");
            return Ok(FetchOutcome::RateLimited);
        }

        if !status.is_success() {
            return Err(E2eError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.text().await.map_err(|source| E2eError::Http {
            url: url.clone(),
            source,
        })?;

        let raw: Vec<ApiPullRequest> =
            serde_json::from_str(&body).map_err(|e| E2eError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let records = raw
            .into_iter()
            .map(PullRequestRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Fetched {} pull requests from {}", records.len(), repo);

        Ok(FetchOutcome::Records(records))
    }
}

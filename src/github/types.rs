use crate::E2eError;
use chrono::DateTime;
use serde::Deserialize;
use std::fmt;

/// State of a pull request as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl PrState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `state` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    /// Only open pull requests
    Open,
    /// Open and closed pull requests
    All,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::All => "all",
        }
    }
}

/// Pull request fields used for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    pub title: String,

    /// Creation time as sent by the API (RFC 3339)
    pub created_at: String,

    pub author_login: String,

    pub html_url: String,

    pub state: PrState,
}

impl PullRequestRecord {
    /// Creates a record, validating the creation timestamp
    pub fn new(
        title: impl Into<String>,
        created_at: impl Into<String>,
        author_login: impl Into<String>,
        html_url: impl Into<String>,
        state: PrState,
    ) -> Result<Self, E2eError> {
        let created_at = created_at.into();
        DateTime::parse_from_rfc3339(&created_at).map_err(|e| {
            E2eError::InvalidRecord(format!("created_at {:?} is not RFC 3339: {}", created_at, e))
        })?;

        Ok(Self {
            title: title.into(),
            created_at,
            author_login: author_login.into(),
            html_url: html_url.into(),
            state,
        })
    }
}

/// Wire shape of a pull request; only the exported fields are declared
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPullRequest {
    title: String,
    created_at: String,
    user: ApiUser,
    html_url: String,
    state: PrState,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
}

impl TryFrom<ApiPullRequest> for PullRequestRecord {
    type Error = E2eError;

    fn try_from(pr: ApiPullRequest) -> Result<Self, Self::Error> {
        PullRequestRecord::new(pr.title, pr.created_at, pr.user.login, pr.html_url, pr.state)
    }
}

/// Splits records into (open, closed), preserving order
pub fn partition_by_state(
    records: &[PullRequestRecord],
) -> (Vec<&PullRequestRecord>, Vec<&PullRequestRecord>) {
    records.iter().partition(|pr| pr.state == PrState::Open)
}

//! HTTP fetcher used by the link auditor
//!
//! The auditor only needs the status code of a GET, so fetching sits behind
//! the [`LinkFetcher`] trait. [`HttpLinkFetcher`] is the reqwest-backed
//! implementation; tests substitute canned responses.

use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Transport-level failure while checking a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request did not complete within the client timeout
    Timeout,

    /// Connection refused, DNS failure or TLS handshake error
    Connect(String),

    /// Any other error raised before a status code was received
    Other(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timeout"),
            Self::Connect(e) => write!(f, "Connection failed: {}", e),
            Self::Other(e) => write!(f, "{}", e),
        }
    }
}

/// Issues the GET request for a single link
pub trait LinkFetcher {
    /// Requests `url` and returns the HTTP status code of the final response
    fn fetch_status(&self, url: &str) -> impl Future<Output = Result<u16, FetchFailure>> + Send;
}

/// Builds an HTTP client for link checks and API calls
///
/// Redirects are followed with reqwest's default policy, so a 301 that lands
/// on a 200 reports 200.
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
///
/// # Example
///
/// ```
/// use fashionhub_e2e::audit::build_http_client;
///
/// let client = build_http_client("FashionHub-Test-Automation").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Link fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpLinkFetcher {
    client: Client,
}

impl HttpLinkFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl LinkFetcher for HttpLinkFetcher {
    async fn fetch_status(&self, url: &str) -> Result<u16, FetchFailure> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) => Err(classify_error(&e)),
        }
    }
}

/// Maps a reqwest error onto a transport failure kind
fn classify_error(e: &reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect(e.to_string())
    } else {
        FetchFailure::Other(e.to_string())
    }
}

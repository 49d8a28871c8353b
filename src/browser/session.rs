//! HTTP browser session
//!
//! Loads pages with a cookie-carrying client so that a login form submission
//! and the pages after it share state, the way a browser tab would.

use crate::audit::HttpLinkFetcher;
use crate::browser::form::{Form, FormMethod};
use crate::browser::page::Page;
use crate::browser::wait::{poll_until, DEFAULT_POLL_INTERVAL};
use crate::url::without_query;
use crate::E2eError;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// A browsing session
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Creates a session with its own cookie jar
    pub fn new(user_agent: &str) -> Result<Self, E2eError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Link fetcher sharing this session's client and cookies
    pub fn link_fetcher(&self) -> HttpLinkFetcher {
        HttpLinkFetcher::new(self.client.clone())
    }

    /// Navigates to `url`, following redirects
    pub async fn goto(&self, url: &str) -> Result<Page, E2eError> {
        tracing::debug!("Navigating to {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| E2eError::Http {
                url: url.to_string(),
                source,
            })?;

        Self::into_page(url, response).await
    }

    /// Submits a form with its current values and returns the resulting page
    pub async fn submit(&self, form: &Form) -> Result<Page, E2eError> {
        let pairs = form.submission();
        let action = form.action();
        tracing::debug!("Submitting {:?} form to {}", form.method(), action);

        let request = match form.method() {
            FormMethod::Get => {
                let mut target = Url::parse(action)?;
                target.query_pairs_mut().clear().extend_pairs(&pairs);
                self.client.get(target)
            }
            FormMethod::Post => self.client.post(action).form(&pairs),
        };

        let response = request.send().await.map_err(|source| E2eError::Http {
            url: action.to_string(),
            source,
        })?;

        Self::into_page(action, response).await
    }

    /// Reloads `url` until an element matches `css` or `timeout` elapses
    pub async fn wait_for_selector(
        &self,
        url: &str,
        css: &str,
        timeout: Duration,
    ) -> Result<Page, E2eError> {
        let what = format!("{} on {}", css, url);
        poll_until(&what, timeout, DEFAULT_POLL_INTERVAL, || async {
            let page = self.goto(url).await?;
            let found = page.has_element(css)?;
            Ok::<_, E2eError>(found.then_some(page))
        })
        .await
    }

    async fn into_page(requested: &str, response: Response) -> Result<Page, E2eError> {
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let html = response.text().await.map_err(|source| E2eError::Http {
            url: requested.to_string(),
            source,
        })?;

        tracing::debug!("Loaded {} ({})", without_query(&final_url), status);
        Ok(Page::new(final_url, status, html))
    }
}

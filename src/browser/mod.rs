//! Browser session module
//!
//! An HTTP-driven stand-in for a browser page: it loads documents with a
//! cookie-carrying client, answers CSS queries against the parsed HTML,
//! fills and submits forms, and writes page snapshots as artifacts.
//!
//! Waiting is always done by polling a condition against a deadline, never by
//! sleeping for a fixed period.

mod form;
mod page;
mod session;
mod wait;

pub use form::{Form, FormField, FormMethod};
pub use page::Page;
pub use session::Session;
pub use wait::{poll_until, DEFAULT_POLL_INTERVAL};

use crate::E2eError;
use scraper::Selector;

/// Parses a CSS selector, mapping failures onto the crate error
pub(crate) fn parse_selector(css: &str) -> Result<Selector, E2eError> {
    Selector::parse(css).map_err(|e| E2eError::Selector(format!("{}: {:?}", css, e)))
}

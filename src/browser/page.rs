//! Loaded page and HTML queries
//!
//! The document is kept as text and parsed per query, so a `Page` can be held
//! across await points.

use crate::browser::form::Form;
use crate::browser::parse_selector;
use crate::output::write_file;
use crate::E2eError;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

/// A document loaded by a [`Session`](crate::browser::Session)
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    status: u16,
    html: String,
}

impl Page {
    /// Creates a page from a response
    pub fn new(url: impl Into<String>, status: u16, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            html: html.into(),
        }
    }

    /// Final URL after redirects
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Extracts the page title from the `<title>` element
    pub fn title(&self) -> Option<String> {
        let document = Html::parse_document(&self.html);
        let selector = Selector::parse("title").ok()?;

        document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Returns the `href` of every `<a>` element in document order
    ///
    /// Anchors without an `href` attribute yield `None`.
    pub fn anchor_hrefs(&self) -> Vec<Option<String>> {
        let document = Html::parse_document(&self.html);
        let Ok(selector) = Selector::parse("a") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .map(|element| element.value().attr("href").map(str::to_string))
            .collect()
    }

    /// Returns the number of elements matching `css`
    pub fn count(&self, css: &str) -> Result<usize, E2eError> {
        let selector = parse_selector(css)?;
        let document = Html::parse_document(&self.html);
        Ok(document.select(&selector).count())
    }

    /// Returns true if at least one element matches `css`
    pub fn has_element(&self, css: &str) -> Result<bool, E2eError> {
        Ok(self.count(css)? > 0)
    }

    /// Text content of the body, excluding scripts and styles
    pub fn text(&self) -> String {
        let document = Html::parse_document(&self.html);
        let root = Selector::parse("body")
            .ok()
            .and_then(|body| document.select(&body).next())
            .unwrap_or_else(|| document.root_element());

        let mut text = String::new();
        collect_text(root, &mut text);
        text
    }

    /// Case-insensitive search of the body text
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text().to_lowercase().contains(&needle.to_lowercase())
    }

    /// Returns the first indicator found in the body text
    pub fn first_indicator<'a>(&self, indicators: &[&'a str]) -> Option<&'a str> {
        let text = self.text().to_lowercase();
        indicators
            .iter()
            .copied()
            .find(|indicator| text.contains(&indicator.to_lowercase()))
    }

    /// Builds the form model of the first `<form>` matching `css`
    pub fn form(&self, css: &str) -> Result<Form, E2eError> {
        let selector = parse_selector(css)?;
        let document = Html::parse_document(&self.html);

        let element = document
            .select(&selector)
            .next()
            .ok_or_else(|| E2eError::ElementNotFound {
                selector: css.to_string(),
                url: self.url.clone(),
            })?;

        Form::from_element(element, &self.url)
    }

    /// Writes the HTML to `path`, creating parent directories
    pub fn save_snapshot(&self, path: &Path) -> Result<(), E2eError> {
        write_file(path, &self.html)?;
        tracing::debug!("Saved snapshot of {} to {}", self.url, path.display());
        Ok(())
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name == "script" || name == "style" {
                continue;
            }
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        }
    }
}

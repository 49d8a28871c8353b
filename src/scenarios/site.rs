//! Page load, navigation and link status checks

use crate::audit::{audit_links, audit_links_with, is_success_status};
use crate::browser::Session;
use crate::config::Settings;
use crate::scenarios::ScenarioOutcome;
use crate::url::join_url;
use crate::E2eError;

/// Elements accepted as site navigation
pub const NAVIGATION_SELECTOR: &str = "nav, .nav, .navigation, header";

/// The home page answers with a success status and has a non-empty title
pub async fn page_loads(session: &Session, settings: &Settings) -> Result<ScenarioOutcome, E2eError> {
    let page = session.goto(&settings.base_url).await?;

    if !is_success_status(page.status()) {
        return Err(E2eError::Assertion(format!(
            "{} answered with status {}",
            page.url(),
            page.status()
        )));
    }

    let title = page
        .title()
        .ok_or_else(|| E2eError::Assertion(format!("{} has no title", page.url())))?;

    tracing::info!("Page title: {}", title);
    Ok(ScenarioOutcome::Passed(format!("title {:?}", title)))
}

/// The home page contains a navigation element
pub async fn navigation_visible(
    session: &Session,
    settings: &Settings,
) -> Result<ScenarioOutcome, E2eError> {
    let page = session.goto(&settings.base_url).await?;

    if !page.has_element(NAVIGATION_SELECTOR)? {
        return Err(E2eError::Assertion(format!(
            "no element matching {:?} on {}",
            NAVIGATION_SELECTOR,
            page.url()
        )));
    }

    tracing::info!("Navigation elements found");
    Ok(ScenarioOutcome::Passed("navigation present".to_string()))
}

/// Every link on the home page answers with 200..400
pub async fn link_status(session: &Session, settings: &Settings) -> Result<ScenarioOutcome, E2eError> {
    let page = session.goto(&settings.base_url).await?;
    let hrefs = page.anchor_hrefs();

    tracing::info!(
        "Found {} links to check",
        hrefs.iter().flatten().filter(|h| !h.is_empty()).count()
    );

    let report = audit_links(&hrefs, &settings.base_url, &session.link_fetcher()).await?;
    report.log_summary();
    report.ensure_healthy()?;

    Ok(ScenarioOutcome::Passed(format!(
        "{} links healthy",
        report.summary().successful
    )))
}

/// Every link on the home page, joined with plain RFC 3986 rules, answers with 200..400
///
/// Unlike [`link_status`], root-relative hrefs are joined against the full
/// base URL instead of being appended to its origin verbatim.
pub async fn page_links(session: &Session, settings: &Settings) -> Result<ScenarioOutcome, E2eError> {
    let page = session.goto(&settings.base_url).await?;
    let hrefs = page.anchor_hrefs();

    let report = audit_links_with(&hrefs, &settings.base_url, &session.link_fetcher(), join_url).await?;
    tracing::info!("Found {} links to check", report.summary().total);
    report.ensure_healthy()?;

    Ok(ScenarioOutcome::Passed(format!(
        "{} links healthy",
        report.summary().successful
    )))
}

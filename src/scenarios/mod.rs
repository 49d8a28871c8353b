//! End-to-end scenarios
//!
//! Each scenario is one check. A scenario either
//! returns an outcome (passed or skipped) or an error, which counts as a
//! failure. Scenarios are independent: each gets a fresh browser session.

mod login;
mod pull_requests;
mod site;

pub use login::{
    attempt_login, login_form_present, login_invalid, login_valid, LoginAttempt,
    ERROR_INDICATORS, PASSWORD_SELECTOR, SUBMIT_SELECTOR, SUCCESS_INDICATORS, USERNAME_SELECTOR,
};
pub use pull_requests::{
    export_all_pull_requests, export_mock_pull_requests, export_open_pull_requests,
    mock_pull_requests, validate_sample_csv,
};
pub use site::{link_status, navigation_visible, page_links, page_loads, NAVIGATION_SELECTOR};

use crate::browser::Session;
use crate::config::Settings;
use crate::github::PullRequestClient;
use crate::E2eError;
use std::fmt;

/// User agent of the browser session
pub const SESSION_USER_AGENT: &str = concat!("fashionhub-e2e/", env!("CARGO_PKG_VERSION"));

/// Result of a scenario that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// All checks held
    Passed(String),

    /// The scenario could not run meaningfully (e.g. API rate limit)
    Skipped(String),
}

impl ScenarioOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// The checks of the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    PageLoads,
    NavigationVisible,
    LinkStatus,
    PageLinks,
    LoginValid,
    LoginInvalid,
    LoginFormPresent,
    ExportOpenPullRequests,
    ExportAllPullRequests,
    ValidateSampleCsv,
    ExportMockPullRequests,
}

impl Scenario {
    /// Every scenario, in execution order
    pub const ALL: [Scenario; 11] = [
        Scenario::PageLoads,
        Scenario::NavigationVisible,
        Scenario::LinkStatus,
        Scenario::PageLinks,
        Scenario::LoginValid,
        Scenario::LoginInvalid,
        Scenario::LoginFormPresent,
        Scenario::ExportOpenPullRequests,
        Scenario::ExportAllPullRequests,
        Scenario::ValidateSampleCsv,
        Scenario::ExportMockPullRequests,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PageLoads => "should load the FashionHub website successfully",
            Self::NavigationVisible => "should have working navigation",
            Self::LinkStatus => "should verify all links return 200 or 30x status codes",
            Self::PageLinks => "should verify specific page links work correctly",
            Self::LoginValid => "should successfully log in with valid credentials",
            Self::LoginInvalid => "should handle invalid credentials appropriately",
            Self::LoginFormPresent => "should verify login form elements are present",
            Self::ExportOpenPullRequests => "should fetch and export open pull requests to CSV",
            Self::ExportAllPullRequests => "should fetch all pull requests (open and closed)",
            Self::ValidateSampleCsv => "should validate CSV format and content",
            Self::ExportMockPullRequests => "should handle CSV export functionality with mock data",
        }
    }

    /// Runs the scenario against the configured environment
    pub async fn run(&self, settings: &Settings) -> Result<ScenarioOutcome, E2eError> {
        match self {
            Self::PageLoads => page_loads(&Session::new(SESSION_USER_AGENT)?, settings).await,
            Self::NavigationVisible => {
                navigation_visible(&Session::new(SESSION_USER_AGENT)?, settings).await
            }
            Self::LinkStatus => link_status(&Session::new(SESSION_USER_AGENT)?, settings).await,
            Self::PageLinks => page_links(&Session::new(SESSION_USER_AGENT)?, settings).await,
            Self::LoginValid => login_valid(&Session::new(SESSION_USER_AGENT)?, settings).await,
            Self::LoginInvalid => login_invalid(&Session::new(SESSION_USER_AGENT)?, settings).await,
            Self::LoginFormPresent => {
                login_form_present(&Session::new(SESSION_USER_AGENT)?, settings).await
            }
            Self::ExportOpenPullRequests => {
                export_open_pull_requests(&PullRequestClient::from_settings(settings)?, settings)
                    .await
            }
            Self::ExportAllPullRequests => {
                export_all_pull_requests(&PullRequestClient::from_settings(settings)?, settings)
                    .await
            }
            Self::ValidateSampleCsv => {
                validate_sample_csv(&PullRequestClient::from_settings(settings)?, settings).await
            }
            Self::ExportMockPullRequests => export_mock_pull_requests(settings),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tally of a run
#[derive(Debug, Default)]
pub struct RunReport {
    pub passed: Vec<Scenario>,
    pub skipped: Vec<(Scenario, String)>,
    pub failed: Vec<(Scenario, String)>,
}

impl RunReport {
    /// Returns true if no scenario failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.skipped.len() + self.failed.len()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scenarios: {} passed, {} skipped, {} failed",
            self.total(),
            self.passed.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// Runs scenarios one after another and collects their outcomes
pub async fn run_scenarios(settings: &Settings, scenarios: &[Scenario]) -> RunReport {
    let mut report = RunReport::default();

    for scenario in scenarios {
        tracing::info!("▶ {}", scenario);
        match scenario.run(settings).await {
            Ok(ScenarioOutcome::Passed(detail)) => {
                tracing::info!("✓ {} ({})", scenario, detail);
                report.passed.push(*scenario);
            }
            Ok(ScenarioOutcome::Skipped(reason)) => {
                tracing::warn!("- {} skipped: {}", scenario, reason);
                report.skipped.push((*scenario, reason));
            }
            Err(e) => {
                tracing::error!("✗ {}: {}", scenario, e);
                report.failed.push((*scenario, e.to_string()));
            }
        }
    }

    report
}

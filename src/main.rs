//! FashionHub end-to-end checks entry point
//!
//! Runs the selected scenarios against the environment described by the
//! process environment variables and exits non-zero if any of them fails.

use clap::{Parser, ValueEnum};
use fashionhub_e2e::config::Settings;
use fashionhub_e2e::scenarios::{run_scenarios, Scenario};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// FashionHub end-to-end checks
///
/// Validates page load, navigation, link health and login on the FashionHub
/// shop, and exports pull-request data from the GitHub API to CSV. Targets
/// are configured through environment variables (ENV, BASE_URL_*, GITHUB_*,
/// OUTPUT_DIR, ...), read from the process or a `.env` file in the working
/// directory.
#[derive(Parser, Debug)]
#[command(name = "fashionhub-e2e")]
#[command(version)]
#[command(about = "End-to-end checks for the FashionHub shop", long_about = None)]
struct Cli {
    /// Group of scenarios to run
    #[arg(value_enum, default_value_t = Suite::All)]
    suite: Suite,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the resolved settings and exit without running anything
    #[arg(long)]
    show_config: bool,
}

/// Scenario groups selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Suite {
    /// Every scenario
    All,
    /// Page load and navigation
    Site,
    /// Link status codes of the home page, under both resolution rules
    Links,
    /// Login form behaviour
    Login,
    /// Pull-request extraction from the GitHub API
    PullRequests,
    /// CSV export with fixed records, no network
    MockExport,
}

impl Suite {
    fn scenarios(&self) -> Vec<Scenario> {
        match self {
            Suite::All => Scenario::ALL.to_vec(),
            Suite::Site => vec![Scenario::PageLoads, Scenario::NavigationVisible],
            Suite::Links => vec![Scenario::LinkStatus, Scenario::PageLinks],
            Suite::Login => vec![
                Scenario::LoginValid,
                Scenario::LoginInvalid,
                Scenario::LoginFormPresent,
            ],
            Suite::PullRequests => vec![
                Scenario::ExportOpenPullRequests,
                Scenario::ExportAllPullRequests,
                Scenario::ValidateSampleCsv,
                Scenario::ExportMockPullRequests,
            ],
            Suite::MockExport => vec![Scenario::ExportMockPullRequests],
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let settings = Settings::from_env_and_file(Path::new(".env"));

    if cli.show_config {
        print_settings(&settings);
        return Ok(());
    }

    tracing::info!(
        "Running {:?} against {} ({})",
        cli.suite,
        settings.base_url,
        settings.environment.as_str()
    );

    let report = run_scenarios(&settings, &cli.suite.scenarios()).await;
    tracing::info!("{}", report);

    if !report.is_success() {
        for (scenario, error) in &report.failed {
            tracing::error!("FAILED {}: {}", scenario, error);
        }
        anyhow::bail!("{} of {} scenarios failed", report.failed.len(), report.total());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fashionhub_e2e=info,warn"),
            1 => EnvFilter::new("fashionhub_e2e=debug,info"),
            2 => EnvFilter::new("fashionhub_e2e=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints the resolved settings, masking the password
fn print_settings(settings: &Settings) {
    println!("=== FashionHub E2E Settings ===\n");
    println!("Environment: {}", settings.environment.as_str());
    println!("Base URL: {}", settings.base_url);
    println!("Login URL: {}", settings.login_url());
    println!("Username: {}", settings.username);
    println!("Password: {}", "*".repeat(settings.password.len()));
    println!("\nGitHub:");
    println!("  API: {}", settings.github_api_url);
    println!("  Repository: {}", settings.github_repo);
    println!("\nOutput:");
    println!("  Directory: {}", settings.output_dir.display());
    println!("  Pull requests CSV: {}", settings.csv_output_file.display());
}

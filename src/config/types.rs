use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Deployment environment the checks target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Developer machine (`ENV=local`)
    Local,
    /// Staging deployment (`ENV=staging`)
    Staging,
    /// Public deployment, used for any other value
    Production,
}

impl Environment {
    /// Maps the raw `ENV` value to an environment; unknown values fall back to production
    pub fn from_name(name: &str) -> Self {
        match name {
            "local" => Self::Local,
            "staging" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Returns the name used in the `ENV` variable
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Resolved settings for a run
///
/// Built once at process start and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Environment selected through `ENV`
    pub environment: Environment,

    /// Root URL of the shop, always ending with the site prefix (e.g. `/fashionhub/`)
    pub base_url: String,

    /// Login name used for the valid-credentials scenario
    pub username: String,

    /// Password used for the valid-credentials scenario
    pub password: String,

    /// Repository identifier in `owner/name` form
    pub github_repo: String,

    /// Base of the repositories API (e.g. `https://api.github.com/repos`)
    pub github_api_url: String,

    /// Directory receiving CSV files and page snapshots
    pub output_dir: PathBuf,

    /// Destination of the open pull-request export
    pub csv_output_file: PathBuf,
}

impl Settings {
    /// Resolves settings from an explicit variable map
    pub fn resolve(env: &HashMap<String, String>) -> Self {
        super::parser::resolve(env)
    }

    /// Resolves settings from the current process environment
    pub fn from_env() -> Self {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(&env)
    }

    /// Resolves settings from the process environment plus a dotenv file
    ///
    /// Variables already set in the process take precedence over the file.
    /// A missing file is ignored; an unreadable or malformed one is logged
    /// and skipped.
    pub fn from_env_and_file(path: &Path) -> Self {
        let mut env: HashMap<String, String> = std::env::vars().collect();

        match super::parser::merge_env_file(&mut env, path) {
            Ok(added) => tracing::debug!("Loaded {} variables from {}", added, path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
        }

        Self::resolve(&env)
    }

    /// URL of the login page
    pub fn login_url(&self) -> String {
        format!("{}login.html", self.base_url)
    }

    /// Path of an artifact written under the output directory
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

use crate::config::types::{Environment, Settings};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default values used when a variable is absent or empty
pub mod defaults {
    pub const ENV: &str = "production";
    pub const BASE_URL_LOCAL: &str = "http://localhost:4000/fashionhub/";
    pub const BASE_URL_STAGING: &str = "https://staging-env/fashionhub/";
    pub const BASE_URL_PRODUCTION: &str = "https://pocketaces2.github.io/fashionhub/";
    pub const TEST_USERNAME: &str = "demouser";
    pub const TEST_PASSWORD: &str = "fashion123";
    pub const GITHUB_REPO: &str = "appwrite/appwrite";
    pub const GITHUB_API_URL: &str = "https://api.github.com/repos";
    pub const OUTPUT_DIR: &str = "./test-results";
    pub const CSV_OUTPUT_FILE: &str = "./test-results/pull-requests.csv";
}

/// Resolves settings from a variable map
///
/// This never fails: every field has a default. A variable set to the empty
/// string is treated as unset.
///
/// # Base URL Selection
///
/// | `ENV` | Variable | Default |
/// |-------|----------|---------|
/// | `local` | `BASE_URL_LOCAL` | `http://localhost:4000/fashionhub/` |
/// | `staging` | `BASE_URL_STAGING` | `https://staging-env/fashionhub/` |
/// | anything else | `BASE_URL_PRODUCTION` | `https://pocketaces2.github.io/fashionhub/` |
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use fashionhub_e2e::config::resolve;
///
/// let mut env = HashMap::new();
/// env.insert("ENV".to_string(), "local".to_string());
/// let settings = resolve(&env);
/// assert_eq!(settings.base_url, "http://localhost:4000/fashionhub/");
/// ```
pub fn resolve(env: &HashMap<String, String>) -> Settings {
    let lookup = |key: &str, default: &str| -> String {
        env.get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    let environment = Environment::from_name(&lookup("ENV", defaults::ENV));

    let base_url = match environment {
        Environment::Local => lookup("BASE_URL_LOCAL", defaults::BASE_URL_LOCAL),
        Environment::Staging => lookup("BASE_URL_STAGING", defaults::BASE_URL_STAGING),
        Environment::Production => lookup("BASE_URL_PRODUCTION", defaults::BASE_URL_PRODUCTION),
    };

    Settings {
        environment,
        base_url,
        username: lookup("TEST_USERNAME", defaults::TEST_USERNAME),
        password: lookup("TEST_PASSWORD", defaults::TEST_PASSWORD),
        github_repo: lookup("GITHUB_REPO", defaults::GITHUB_REPO),
        github_api_url: lookup("GITHUB_API_URL", defaults::GITHUB_API_URL),
        output_dir: PathBuf::from(lookup("OUTPUT_DIR", defaults::OUTPUT_DIR)),
        csv_output_file: PathBuf::from(lookup("CSV_OUTPUT_FILE", defaults::CSV_OUTPUT_FILE)),
    }
}

/// Adds the variables of a dotenv file to `env`
///
/// Keys already present in `env` keep their value, so the process
/// environment wins over the file. Returns the number of variables added.
///
/// # Errors
///
/// Fails if the file is missing (see [`dotenvy::Error::not_found`]) or has a
/// malformed line.
pub fn merge_env_file(
    env: &mut HashMap<String, String>,
    path: &Path,
) -> Result<usize, dotenvy::Error> {
    let mut added = 0;
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        if !env.contains_key(&key) {
            env.insert(key, value);
            added += 1;
        }
    }
    Ok(added)
}

//! Configuration module for the FashionHub checks
//!
//! Settings are resolved once from environment variables, optionally
//! supplemented by a `.env` file, with a hard-coded default for every field,
//! and then passed by reference to every consumer.
//!
//! # Example
//!
//! ```no_run
//! use fashionhub_e2e::config::Settings;
//!
//! let settings = Settings::from_env();
//! println!("Checking {}", settings.base_url);
//! ```

mod parser;
mod types;

// Re-export types
pub use types::{Environment, Settings};

// Re-export parser functions and default values
pub use parser::{defaults, merge_env_file, resolve};

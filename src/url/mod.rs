//! URL handling module
//!
//! Turns the `href` values found on a page into absolute URLs that can be
//! requested directly.

mod origin;
mod resolve;

// Re-export main functions
pub use origin::origin_of;
pub use resolve::{join_url, resolve_url, without_query};

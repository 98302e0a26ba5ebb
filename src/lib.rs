// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitKing - Git command and workflow reference
//!
//! A catalog of atomic Git commands and multi-step scenarios with
//! typo-tolerant search and placeholder substitution.
//!
//! # Features
//!
//! - **Command Registry**: Atomic commands looked up by id, category or text
//! - **Scenario Registry**: Ordered workflows built from atomic commands
//! - **Fuzzy Search**: Weighted, typo-tolerant ranking with match highlights
//! - **Substitution**: Fill `<placeholders>` from entered or remembered values
//! - **Catalog Lint**: Detect broken references and undeclared placeholders
//!
//! # Example
//!
//! ```no_run
//! use gitking::catalog::{Catalog, Locale};
//! use gitking::config::GkConfig;
//! use gitking::search::CatalogSearch;
//!
//! let config = GkConfig::load().unwrap();
//! let catalog = Catalog::load(&config).unwrap();
//!
//! let search = CatalogSearch::new(&catalog, &config.search, Locale::En);
//! for hit in search.search_commands("comit") {
//!     println!("{} ({:.3})", hit.item.full_command, hit.score);
//! }
//! ```

// Module declarations
pub mod assistant;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod search;
pub mod store;
pub mod template;
pub mod view;

// Re-exports for convenience
pub use config::GkConfig;
pub use error::{GkError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of gitking.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}

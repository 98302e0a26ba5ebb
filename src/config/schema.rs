// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from gitking.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::Locale;

/// The main configuration structure for gitking.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GkConfig {
    /// Fuzzy search configuration.
    pub search: SearchConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,

    /// Variable store configuration.
    pub store: StoreConfig,

    /// Catalog configuration.
    pub catalog: CatalogConfig,
}

impl GkConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Fuzzy search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Match threshold: 0.0 requires an exact match, 1.0 matches anything.
    pub threshold: f64,

    /// Matched runs shorter than this are ignored.
    pub min_match_char_length: usize,

    /// Maximum results per kind in the palette.
    pub max_results: usize,

    /// Maximum number of tag suggestions.
    pub suggestion_limit: usize,

    /// Field weights for the command index.
    pub command_weights: CommandWeights,

    /// Field weights for the scenario index.
    pub scenario_weights: ScenarioWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_char_length: 2,
            max_results: 10,
            suggestion_limit: 5,
            command_weights: CommandWeights::default(),
            scenario_weights: ScenarioWeights::default(),
        }
    }
}

/// Relative field weights for atomic commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandWeights {
    pub command: f64,
    pub description: f64,
    pub tags: f64,
    pub category: f64,
}

impl Default for CommandWeights {
    fn default() -> Self {
        Self {
            command: 0.4,
            description: 0.3,
            tags: 0.2,
            category: 0.1,
        }
    }
}

/// Relative field weights for scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioWeights {
    pub title: f64,
    pub description: f64,
    pub tags: f64,
    pub steps: f64,
}

impl Default for ScenarioWeights {
    fn default() -> Self {
        Self {
            title: 0.4,
            description: 0.3,
            tags: 0.2,
            steps: 0.1,
        }
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Display locale.
    pub locale: Locale,

    /// Whether to use colors.
    pub color: bool,

    /// Marker inserted before a highlighted match.
    pub highlight_open: String,

    /// Marker inserted after a highlighted match.
    pub highlight_close: String,

    /// Tags shown per entry in listings.
    pub max_tags: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::DEFAULT,
            color: true,
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
            max_tags: 3,
        }
    }
}

/// Variable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file path (defaults to the user data directory).
    pub path: Option<PathBuf>,

    /// Entries kept per history list.
    pub max_history_items: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_history_items: 10,
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Extra catalog file merged over the built-in data.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GkConfig::default();
        assert_eq!(config.search.threshold, 0.4);
        assert_eq!(config.search.min_match_char_length, 2);
        assert_eq!(config.ui.locale, Locale::En);
        assert_eq!(config.ui.max_tags, 3);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_default_weights() {
        let config = GkConfig::default();
        assert_eq!(config.search.command_weights.command, 0.4);
        assert_eq!(config.search.scenario_weights.steps, 0.1);
    }

    #[test]
    fn test_config_serialization() {
        let config = GkConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("min_match_char_length"));
        assert!(toml_str.contains("locale = \"en\""));
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, GkError, Result};
use std::path::{Path, PathBuf};

use super::schema::{
    CatalogConfig, CommandWeights, GkConfig, ScenarioWeights, SearchConfig, StoreConfig, UiConfig,
};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["gitking.toml", ".gitking.toml", ".config/gitking.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
///
/// A project file wins; the user-level file is the fallback.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    find_project_config_from(start_dir).or_else(user_config_file)
}

/// Find a project configuration file in `start_dir`, its parents, or home.
pub fn find_project_config_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    None
}

/// The user-level configuration file, `<config_dir>/gitking/config.toml`.
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("gitking").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from the default locations.
///
/// The user-level file is the base and the project file is merged over it.
pub fn load_config() -> Result<GkConfig> {
    let project = std::env::current_dir()
        .ok()
        .and_then(|dir| find_project_config_from(&dir));
    load_layered(user_config_file().as_deref(), project.as_deref())
}

/// Load a user-level base and a project overlay, either of which may be absent.
pub fn load_layered(user: Option<&Path>, project: Option<&Path>) -> Result<GkConfig> {
    match (user, project) {
        (Some(user), Some(project)) if user != project => {
            tracing::debug!("Merging {:?} over {:?}", project, user);
            Ok(merge_configs(
                load_config_from(user)?,
                load_config_from(project)?,
            ))
        }
        (_, Some(path)) | (Some(path), None) => load_config_from(path),
        (None, None) => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(GkConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GkConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(GkError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        GkError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    let mut config = parse_config(&content)?;

    // Relative catalog/store paths are relative to the config file
    if let Some(base) = path.parent() {
        config.catalog.path = config.catalog.path.map(|p| resolve_relative(base, p));
        config.store.path = config.store.path.map(|p| resolve_relative(base, p));
    }

    Ok(config)
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GkConfig> {
    let config: GkConfig = toml::from_str(content).map_err(|e| {
        GkError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject values the search index cannot work with.
pub fn validate_config(config: &GkConfig) -> Result<()> {
    let threshold = config.search.threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(GkError::Config(ConfigError::InvalidValue {
            key: "search.threshold".to_string(),
            message: format!("{} is outside 0.0..=1.0", threshold),
        }));
    }

    let cw = &config.search.command_weights;
    let sw = &config.search.scenario_weights;
    let weights = [
        ("search.command_weights", [cw.command, cw.description, cw.tags, cw.category]),
        ("search.scenario_weights", [sw.title, sw.description, sw.tags, sw.steps]),
    ];
    for (key, values) in weights {
        if values.iter().any(|w| *w < 0.0) || values.iter().sum::<f64>() <= 0.0 {
            return Err(GkError::Config(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "weights must be non-negative with a positive sum".to_string(),
            }));
        }
    }

    Ok(())
}

/// Merge two configurations, with the overlay taking precedence.
///
/// Every value from the overlay wins when it differs from the default;
/// otherwise the base value is kept. Optional paths fall back to the base.
pub fn merge_configs(base: GkConfig, overlay: GkConfig) -> GkConfig {
    let defaults = GkConfig::default();
    let (b, o, d) = (base.search, overlay.search, defaults.search);
    let (bc, oc, dc) = (b.command_weights, o.command_weights, d.command_weights);
    let (bs, os, ds) = (b.scenario_weights, o.scenario_weights, d.scenario_weights);

    GkConfig {
        search: SearchConfig {
            threshold: pick(o.threshold, b.threshold, d.threshold),
            min_match_char_length: pick(
                o.min_match_char_length,
                b.min_match_char_length,
                d.min_match_char_length,
            ),
            max_results: pick(o.max_results, b.max_results, d.max_results),
            suggestion_limit: pick(o.suggestion_limit, b.suggestion_limit, d.suggestion_limit),
            command_weights: CommandWeights {
                command: pick(oc.command, bc.command, dc.command),
                description: pick(oc.description, bc.description, dc.description),
                tags: pick(oc.tags, bc.tags, dc.tags),
                category: pick(oc.category, bc.category, dc.category),
            },
            scenario_weights: ScenarioWeights {
                title: pick(os.title, bs.title, ds.title),
                description: pick(os.description, bs.description, ds.description),
                tags: pick(os.tags, bs.tags, ds.tags),
                steps: pick(os.steps, bs.steps, ds.steps),
            },
        },
        ui: UiConfig {
            locale: pick(overlay.ui.locale, base.ui.locale, defaults.ui.locale),
            color: pick(overlay.ui.color, base.ui.color, defaults.ui.color),
            highlight_open: pick(
                overlay.ui.highlight_open,
                base.ui.highlight_open,
                defaults.ui.highlight_open,
            ),
            highlight_close: pick(
                overlay.ui.highlight_close,
                base.ui.highlight_close,
                defaults.ui.highlight_close,
            ),
            max_tags: pick(overlay.ui.max_tags, base.ui.max_tags, defaults.ui.max_tags),
        },
        store: StoreConfig {
            path: overlay.store.path.or(base.store.path),
            max_history_items: pick(
                overlay.store.max_history_items,
                base.store.max_history_items,
                defaults.store.max_history_items,
            ),
        },
        catalog: CatalogConfig {
            path: overlay.catalog.path.or(base.catalog.path),
        },
    }
}

fn pick<T: PartialEq>(overlay: T, base: T, default: T) -> T {
    if overlay != default {
        overlay
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Locale;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.search.threshold, 0.4);
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[search]
threshold = 0.2
max_results = 5

[search.command_weights]
command = 1.0
description = 0.5
tags = 0.0
category = 0.0

[ui]
locale = "zh"
color = false
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.command_weights.command, 1.0);
        assert_eq!(config.ui.locale, Locale::Zh);
        assert!(!config.ui.color);
        assert_eq!(config.ui.highlight_open, "<mark>");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = parse_config("[search]\nthreshold = 1.5").unwrap_err();
        assert!(err.to_string().contains("search.threshold"));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let toml = r#"
[search.scenario_weights]
title = 0.0
description = 0.0
tags = 0.0
steps = 0.0
"#;
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_relative_paths_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitking.toml");
        std::fs::write(&path, "[catalog]\npath = \"extra.toml\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.catalog.path, Some(dir.path().join("extra.toml")));
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitking.toml"), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".gitking.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_from(Path::new("/nonexistent/gitking.toml")).unwrap_err();
        assert!(matches!(err, GkError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_merge_configs() {
        let base = parse_config("[ui]\nlocale = \"zh\"\n[store]\nmax_history_items = 20").unwrap();
        let overlay = parse_config("[search]\nthreshold = 0.3").unwrap();
        let merged = merge_configs(base, overlay);

        assert_eq!(merged.search.threshold, 0.3);
        assert_eq!(merged.ui.locale, Locale::Zh);
        assert_eq!(merged.store.max_history_items, 20);
    }

    #[test]
    fn test_merge_keeps_base_ui_and_weights() {
        let base = parse_config(
            r#"
[ui]
max_tags = 5
color = false
highlight_open = "["
highlight_close = "]"

[search.command_weights]
command = 0.9

[search.scenario_weights]
steps = 0.5
"#,
        )
        .unwrap();
        let merged = merge_configs(base, GkConfig::default());

        assert_eq!(merged.ui.max_tags, 5);
        assert!(!merged.ui.color);
        assert_eq!(merged.ui.highlight_open, "[");
        assert_eq!(merged.ui.highlight_close, "]");
        assert_eq!(merged.search.command_weights.command, 0.9);
        assert_eq!(merged.search.command_weights.description, 0.3);
        assert_eq!(merged.search.scenario_weights.steps, 0.5);
    }

    #[test]
    fn test_merge_overlay_weights_win() {
        let base = parse_config("[search.command_weights]\ncommand = 0.9\n[ui]\nmax_tags = 5").unwrap();
        let overlay = parse_config("[search.command_weights]\ncommand = 0.7\n[ui]\nmax_tags = 1").unwrap();
        let merged = merge_configs(base, overlay);

        assert_eq!(merged.search.command_weights.command, 0.7);
        assert_eq!(merged.ui.max_tags, 1);
    }

    #[test]
    fn test_load_layered_merges_project_over_user() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        let project = dir.path().join("gitking.toml");
        std::fs::write(&user, "[ui]\nmax_tags = 6\nlocale = \"zh\"\n").unwrap();
        std::fs::write(&project, "[ui]\nlocale = \"en\"\nmax_tags = 2\n[search]\nmax_results = 4\n").unwrap();

        let config = load_layered(Some(&user), Some(&project)).unwrap();
        assert_eq!(config.ui.max_tags, 2);
        assert_eq!(config.search.max_results, 4);

        let config = load_layered(Some(&user), None).unwrap();
        assert_eq!(config.ui.max_tags, 6);
        assert_eq!(config.ui.locale, Locale::Zh);

        let config = load_layered(None, None).unwrap();
        assert_eq!(config.ui.max_tags, 3);
    }
}

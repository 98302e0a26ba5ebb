// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Catalog files: the built-in data and optional user overlays.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::GkConfig;
use crate::error::{CatalogError, GkError, Result};

use super::command::{AtomicCommandRaw, CommandRegistry};
use super::scenario::{ScenarioRaw, ScenarioRegistry};

const BUILTIN_COMMANDS: &str = include_str!("data/commands.toml");
const BUILTIN_SCENARIOS: &str = include_str!("data/scenarios.toml");

/// The raw contents of one or more catalog files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub commands: Vec<AtomicCommandRaw>,
    pub scenarios: Vec<ScenarioRaw>,
}

impl CatalogFile {
    /// Parse a catalog from TOML.
    pub fn parse(source_name: &str, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            GkError::Catalog(CatalogError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let commands = Self::parse("builtin commands", BUILTIN_COMMANDS)?;
        let scenarios = Self::parse("builtin scenarios", BUILTIN_SCENARIOS)?;
        Ok(commands.merge(scenarios))
    }

    /// Load a catalog file from disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading catalog from: {:?}", path);

        if !path.exists() {
            return Err(GkError::Catalog(CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Merge another catalog on top of this one.
    ///
    /// Entries whose id already exists replace the existing record in place;
    /// new ids are appended.
    pub fn merge(mut self, overlay: CatalogFile) -> Self {
        for command in overlay.commands {
            match self.commands.iter_mut().find(|c| c.id == command.id) {
                Some(existing) => *existing = command,
                None => self.commands.push(command),
            }
        }
        for scenario in overlay.scenarios {
            match self.scenarios.iter_mut().find(|s| s.id == scenario.id) {
                Some(existing) => *existing = scenario,
                None => self.scenarios.push(scenario),
            }
        }
        self
    }
}

/// Both registries, built once and passed to consumers by reference.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    commands: CommandRegistry,
    scenarios: ScenarioRegistry,
}

impl Catalog {
    /// Build the registries from raw records.
    pub fn from_file(file: CatalogFile) -> Self {
        let commands = CommandRegistry::from_raw(file.commands);
        let scenarios = ScenarioRegistry::from_raw(file.scenarios, &commands);
        Self {
            commands,
            scenarios,
        }
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_file(CatalogFile::builtin()?))
    }

    /// The built-in catalog plus the configured overlay file, if any.
    pub fn load(config: &GkConfig) -> Result<Self> {
        let mut file = CatalogFile::builtin()?;
        if let Some(ref path) = config.catalog.path {
            file = file.merge(CatalogFile::load_from(path)?);
        }

        let catalog = Self::from_file(file);
        tracing::debug!(
            "Catalog loaded: {} commands, {} scenarios",
            catalog.commands.len(),
            catalog.scenarios.len()
        );
        Ok(catalog)
    }

    /// The atomic command registry.
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// The scenario registry.
    pub fn scenarios(&self) -> &ScenarioRegistry {
        &self.scenarios
    }
}

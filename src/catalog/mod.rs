// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command and scenario catalog.
//!
//! Atomic commands and scenarios are loaded once from TOML, resolved into
//! read-only registries and shared by reference with the view, search and
//! lint layers.

mod command;
pub mod fallback;
mod loader;
mod scenario;
mod types;

pub use command::{build_full_command, AtomicCommand, AtomicCommandRaw, CommandRegistry};
pub use loader::{Catalog, CatalogFile};
pub use scenario::{
    ResolvedStep, Scenario, ScenarioRaw, ScenarioRegistry, ScenarioStepRaw, StepQuery,
    UNKNOWN_COMMAND_PREFIX,
};
pub use types::{CommandCategory, Difficulty, Locale, LocalizedText, ScenarioCategory};

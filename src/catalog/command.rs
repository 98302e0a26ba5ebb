// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Atomic command records and their registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{CommandCategory, Locale, LocalizedText};

/// An atomic command as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicCommandRaw {
    /// Unique key.
    pub id: String,

    /// Base invocation, e.g. `git push`.
    #[serde(rename = "command")]
    pub base_command: String,

    /// Fragments appended to the base command, space-joined.
    #[serde(default)]
    pub params: Vec<String>,

    /// Used verbatim instead of `command` + `params` when non-empty.
    #[serde(default)]
    pub full_command: Option<String>,

    /// Localized description.
    #[serde(default)]
    pub description: LocalizedText,

    /// Category.
    pub category: CommandCategory,

    /// Lowercase keywords.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Placeholder substrings embedded in the command.
    #[serde(default)]
    pub variables: Vec<String>,

    /// Whether the command can destroy work.
    #[serde(default)]
    pub dangerous: bool,

    /// Optional localized notes.
    #[serde(default)]
    pub notes: Option<LocalizedText>,
}

/// A resolved atomic command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomicCommand {
    pub id: String,
    pub base_command: String,
    pub params: Vec<String>,
    /// The command line shown and copied.
    pub full_command: String,
    pub description: LocalizedText,
    pub category: CommandCategory,
    pub tags: Vec<String>,
    pub variables: Vec<String>,
    pub dangerous: bool,
    pub notes: Option<LocalizedText>,
}

/// Build the full command line of a raw record.
///
/// A non-empty override wins verbatim; otherwise the base command and params
/// are joined with single spaces in order.
pub fn build_full_command(raw: &AtomicCommandRaw) -> String {
    match raw.full_command.as_deref() {
        Some(full) if !full.is_empty() => full.to_string(),
        _ => std::iter::once(raw.base_command.as_str())
            .chain(raw.params.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

impl AtomicCommand {
    /// Resolve a raw record. Never fails.
    pub fn resolve(raw: AtomicCommandRaw) -> Self {
        let full_command = build_full_command(&raw);
        Self {
            id: raw.id,
            base_command: raw.base_command,
            params: raw.params,
            full_command,
            description: raw.description,
            category: raw.category,
            tags: raw.tags,
            variables: raw.variables,
            dangerous: raw.dangerous,
            notes: raw.notes.filter(|n| !n.is_empty()),
        }
    }

    /// Description in the given locale.
    pub fn description(&self, locale: Locale) -> &str {
        self.description.get(locale)
    }

    /// Notes in the given locale, if any.
    pub fn notes(&self, locale: Locale) -> Option<&str> {
        self.notes.as_ref().map(|n| n.get(locale))
    }

    /// Case-insensitive substring match over command, description and tags.
    pub fn matches_substring(&self, query_lower: &str, locale: Locale) -> bool {
        self.full_command.to_lowercase().contains(query_lower)
            || self.description(locale).to_lowercase().contains(query_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(query_lower))
    }
}

/// Read-only table of atomic commands in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<AtomicCommand>,
    by_id: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Build a registry from raw records.
    pub fn from_raw(raws: impl IntoIterator<Item = AtomicCommandRaw>) -> Self {
        Self::new(raws.into_iter().map(AtomicCommand::resolve).collect())
    }

    /// Build a registry from resolved commands.
    ///
    /// With duplicate ids, lookups return the first entry.
    pub fn new(commands: Vec<AtomicCommand>) -> Self {
        let mut by_id = HashMap::with_capacity(commands.len());
        for (index, command) in commands.iter().enumerate() {
            by_id.entry(command.id.clone()).or_insert(index);
        }
        Self { commands, by_id }
    }

    /// All commands in insertion order.
    pub fn all(&self) -> &[AtomicCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Look up a command by id.
    pub fn get_by_id(&self, id: &str) -> Option<&AtomicCommand> {
        self.by_id.get(id).map(|&index| &self.commands[index])
    }

    /// Commands of one category, in insertion order.
    pub fn get_by_category(&self, category: CommandCategory) -> Vec<&AtomicCommand> {
        self.commands
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Plain substring search. An empty query matches everything.
    pub fn search(&self, query: &str, locale: Locale) -> Vec<&AtomicCommand> {
        let query_lower = query.to_lowercase();
        self.commands
            .iter()
            .filter(|c| c.matches_substring(&query_lower, locale))
            .collect()
    }
}

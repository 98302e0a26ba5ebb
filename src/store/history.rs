// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Most-recent-first input history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for any history length.
pub const MAX_HISTORY_LIMIT: usize = 50;

/// Clamp a configured history length to `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_len(len: usize) -> usize {
    len.clamp(1, MAX_HISTORY_LIMIT)
}

/// The kinds of remembered input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Branch,
    Commit,
    Tag,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Branch => "branch",
            HistoryKind::Commit => "commit",
            HistoryKind::Tag => "tag",
        }
    }

    pub fn all() -> &'static [HistoryKind] {
        &[HistoryKind::Branch, HistoryKind::Commit, HistoryKind::Tag]
    }

    /// Guess the history a placeholder feeds, from its name.
    pub fn for_placeholder(placeholder: &str) -> Option<Self> {
        let lower = placeholder.to_lowercase();
        if lower.contains("branch") {
            Some(HistoryKind::Branch)
        } else if lower.contains("message") {
            Some(HistoryKind::Commit)
        } else if lower.contains("version") || lower.contains("tag") {
            Some(HistoryKind::Tag)
        } else {
            None
        }
    }
}

impl FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "branch" | "branches" => Ok(HistoryKind::Branch),
            "commit" | "commits" | "message" => Ok(HistoryKind::Commit),
            "tag" | "tags" => Ok(HistoryKind::Tag),
            _ => Err(format!("Unknown history kind: {}", s)),
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A de-duplicated list of recent values, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<String>);

impl History {
    /// Record a value. Blank values are ignored; an existing equal entry
    /// moves to the front.
    pub fn push(&mut self, value: &str, limit: usize) {
        if value.trim().is_empty() {
            return;
        }
        self.0.retain(|existing| existing != value);
        self.0.insert(0, value.to_string());
        self.0.truncate(limit);
    }

    /// Entries containing `query`, case-insensitively. A blank query
    /// returns every entry.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return self.0.clone();
        }
        let query = query.to_lowercase();
        self.0
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    pub fn truncate(&mut self, limit: usize) {
        self.0.truncate(limit);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

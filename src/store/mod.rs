// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Persistent variable store.
//!
//! Remembers the last value entered for each placeholder plus recent
//! branch names, commit messages and tags. Values are saved as JSON; the
//! catalog core only ever sees [`VariableStore::snapshot`].

mod history;

pub use history::{clamp_history_len, History, HistoryKind, MAX_HISTORY_LIMIT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{GkError, Result, StoreError};

/// File name under the data directory.
const STORE_FILE: &str = "variables.json";

/// A remembered placeholder value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredVariable {
    pub value: String,
    pub last_used: DateTime<Utc>,
}

/// Serialized store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub variables: BTreeMap<String, StoredVariable>,
    pub recent_branch_names: History,
    pub recent_commit_messages: History,
    pub recent_tags: History,
}

/// Variable store bound to a file.
#[derive(Debug, Clone)]
pub struct VariableStore {
    path: PathBuf,
    max_history_items: usize,
    data: StoreData,
}

/// Default store location: `<data_dir>/gitking/variables.json`.
pub fn default_store_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("gitking").join(STORE_FILE))
        .ok_or(GkError::Store(StoreError::NoDataDir))
}

impl VariableStore {
    /// Open the store named by the configuration.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = match &config.path {
            Some(path) => path.clone(),
            None => default_store_path()?,
        };
        Self::open_at(path, config.max_history_items)
    }

    /// Open a store file. A missing file yields an empty store.
    pub fn open_at(path: impl Into<PathBuf>, max_history_items: usize) -> Result<Self> {
        let path = path.into();
        let max_history_items = clamp_history_len(max_history_items);

        let mut data = if path.exists() {
            tracing::debug!("Loading variable store from: {:?}", path);
            let content = fs::read_to_string(&path).map_err(|e| {
                GkError::Store(StoreError::ReadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })
            })?;
            serde_json::from_str::<StoreData>(&content).map_err(|e| {
                GkError::Store(StoreError::Corrupt {
                    message: format!("{}: {}", path.display(), e),
                })
            })?
        } else {
            tracing::debug!("No variable store at {:?}, starting empty", path);
            StoreData::default()
        };

        for history in [
            &mut data.recent_branch_names,
            &mut data.recent_commit_messages,
            &mut data.recent_tags,
        ] {
            history.truncate(max_history_items);
        }

        Ok(Self {
            path,
            max_history_items,
            data,
        })
    }

    /// Write the store to its file, creating parent directories.
    pub fn save(&self) -> Result<()> {
        let write_failed = |message: String| {
            GkError::Store(StoreError::WriteFailed {
                path: self.path.clone(),
                message,
            })
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
            }
        }

        let json =
            serde_json::to_string_pretty(&self.data).map_err(|e| write_failed(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!("Saved variable store to: {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_history_items(&self) -> usize {
        self.max_history_items
    }

    /// Change the history cap (clamped), trimming every list.
    pub fn set_max_history_items(&mut self, max: usize) {
        self.max_history_items = clamp_history_len(max);
        let limit = self.max_history_items;
        for kind in HistoryKind::all() {
            self.history_mut(*kind).truncate(limit);
        }
    }

    /// Remember a placeholder value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.data.variables.insert(
            key.to_string(),
            StoredVariable {
                value: value.to_string(),
                last_used: Utc::now(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.variables.get(key).map(|v| v.value.as_str())
    }

    /// Forget a placeholder value. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.data.variables.remove(key).is_some()
    }

    /// Forget every placeholder value.
    pub fn clear(&mut self) {
        self.data.variables.clear();
    }

    /// Stored variables with their timestamps.
    pub fn variables(&self) -> &BTreeMap<String, StoredVariable> {
        &self.data.variables
    }

    /// Placeholder to value mapping for substitution.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.data
            .variables
            .iter()
            .map(|(key, var)| (key.clone(), var.value.clone()))
            .collect()
    }

    pub fn history(&self, kind: HistoryKind) -> &History {
        match kind {
            HistoryKind::Branch => &self.data.recent_branch_names,
            HistoryKind::Commit => &self.data.recent_commit_messages,
            HistoryKind::Tag => &self.data.recent_tags,
        }
    }

    fn history_mut(&mut self, kind: HistoryKind) -> &mut History {
        match kind {
            HistoryKind::Branch => &mut self.data.recent_branch_names,
            HistoryKind::Commit => &mut self.data.recent_commit_messages,
            HistoryKind::Tag => &mut self.data.recent_tags,
        }
    }

    /// Record a value in a history list.
    pub fn add_to_history(&mut self, kind: HistoryKind, value: &str) {
        let limit = self.max_history_items;
        self.history_mut(kind).push(value, limit);
    }

    pub fn add_branch_name(&mut self, name: &str) {
        self.add_to_history(HistoryKind::Branch, name);
    }

    pub fn add_commit_message(&mut self, message: &str) {
        self.add_to_history(HistoryKind::Commit, message);
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.add_to_history(HistoryKind::Tag, tag);
    }

    /// History entries matching `query`; all entries for a blank query.
    pub fn suggestions(&self, kind: HistoryKind, query: &str) -> Vec<String> {
        self.history(kind).suggestions(query)
    }

    pub fn clear_history(&mut self, kind: HistoryKind) {
        self.history_mut(kind).clear();
    }

    pub fn clear_all_history(&mut self) {
        for kind in HistoryKind::all() {
            self.clear_history(*kind);
        }
    }

    /// Drop all values and histories and restore the default cap.
    pub fn reset(&mut self) {
        self.data = StoreData::default();
        self.max_history_items = StoreConfig::default().max_history_items;
    }
}

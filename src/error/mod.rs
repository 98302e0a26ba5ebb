// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the gitking application.
//!
//! The reference core (registries, views, search, substitution) is
//! infallible. These types cover the host layers around it: configuration,
//! catalog files, the variable store and the interactive CLI.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gitking operations.
#[derive(Error, Debug)]
pub enum GkError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Variable store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User cancelled operation
    #[error("Operation cancelled by user")]
    Cancelled,

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for GkError {
    fn from(err: dialoguer::Error) -> Self {
        GkError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Catalog-related errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("No command or scenario with id '{id}'")]
    UnknownId { id: String },

    #[error("Unknown category: '{category}'")]
    UnknownCategory { category: String },

    #[error("Catalog lint failed: {count} errors found")]
    LintFailed { count: usize },
}

/// Variable store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read variable store {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to write variable store {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("Variable store is corrupt: {message}")]
    Corrupt { message: String },

    #[error("No data directory available for the variable store")]
    NoDataDir,

    #[error("Invalid variable assignment '{input}' (expected PLACEHOLDER=VALUE)")]
    InvalidAssignment { input: String },
}

/// Result type alias for gitking operations.
pub type Result<T> = std::result::Result<T, GkError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GkError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for gitking.
//!
//! This module handles loading, parsing, and merging configuration from
//! gitking.toml files and built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{
    find_config_file, find_config_file_from, find_project_config_from, load_config,
    load_config_from, load_layered, merge_configs, parse_config, user_config_file,
};
pub use schema::*;

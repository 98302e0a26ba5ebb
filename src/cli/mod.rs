// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for gk.
//!
//! This module handles command-line argument parsing, command dispatch and
//! terminal rendering.

pub mod args;
mod dispatch;
mod render;

pub use args::{Cli, Commands};
pub use dispatch::run;

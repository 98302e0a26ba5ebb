// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Assistant helpers: prompt assembly and reply action parsing.
//!
//! No network client lives here; prompts are printed for use elsewhere.

mod actions;
mod prompts;

pub use actions::{parse_action_blocks, strip_action_blocks, ActionBlock, ActionKind};
pub use prompts::{build_prompt, scenario_prompt, scenario_prompts, PromptContext, PromptTemplate};

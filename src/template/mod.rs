// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Placeholder substitution for command templates.
//!
//! Placeholders are literal substrings (`<branch-name>`, `Your Name`, ...).
//! There is no pattern language: no escaping, no word boundaries.

use serde::Serialize;

use crate::catalog::{Locale, ResolvedStep};

/// A step ready for display or copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub command: String,
    pub description: String,
}

impl StepView {
    /// Project a resolved step into the given locale.
    pub fn from_step(step: &ResolvedStep, locale: Locale) -> Self {
        Self {
            command: step.command.clone(),
            description: step.description(locale).to_string(),
        }
    }
}

/// Replace every occurrence of each placeholder with its trimmed value.
///
/// Values that are empty after trimming are skipped, leaving the placeholder
/// in place. Longer placeholders are applied first (ties in lexicographic
/// order), so a placeholder that is a substring of another never clobbers
/// the longer one.
pub fn substitute<I, K, V>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = values
        .into_iter()
        .filter(|(placeholder, value)| {
            !placeholder.as_ref().is_empty() && !value.as_ref().trim().is_empty()
        })
        .collect();

    pairs.sort_by(|(a, _), (b, _)| {
        let (a, b) = (a.as_ref(), b.as_ref());
        b.len().cmp(&a.len()).then_with(|| a.cmp(b))
    });

    pairs
        .iter()
        .fold(template.to_string(), |out, (placeholder, value)| {
            out.replace(placeholder.as_ref(), value.as_ref().trim())
        })
}

/// Substitute into every step's command; descriptions are left untouched.
pub fn substitute_sequence<'a, S, I, K, V>(steps: S, values: I) -> Vec<StepView>
where
    S: IntoIterator<Item = &'a StepView>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let values: Vec<(K, V)> = values.into_iter().collect();
    steps
        .into_iter()
        .map(|step| StepView {
            command: substitute(
                &step.command,
                values.iter().map(|(k, v)| (k.as_ref(), v.as_ref())),
            ),
            description: step.description.clone(),
        })
        .collect()
}

/// The distinct variables of a step list, in first-seen order.
pub fn unique_variables(steps: &[ResolvedStep]) -> Vec<String> {
    let mut seen = Vec::new();
    for variable in steps.iter().flat_map(|s| s.variables.iter()) {
        if !seen.contains(variable) {
            seen.push(variable.clone());
        }
    }
    seen
}

/// Format steps as a commented shell script.
pub fn format_script(steps: &[StepView]) -> String {
    steps
        .iter()
        .map(|step| format!("# {}\n{}", step.description, step.command))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single command, optionally preceded by a comment line.
pub fn format_with_comment(command: &str, comment: Option<&str>) -> String {
    match comment {
        Some(comment) if !comment.is_empty() => format!("# {}\n{}", comment, command),
        _ => command.to_string(),
    }
}

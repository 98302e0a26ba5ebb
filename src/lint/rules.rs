// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in lint rules.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::catalog::{Catalog, UNKNOWN_COMMAND_PREFIX};

use super::LintIssue;

lazy_static! {
    /// An angle-bracket placeholder such as `<branch-name>`.
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"<[^<>\s]+>").unwrap();
}

/// Angle-bracket placeholders in a command line, in order of appearance.
pub fn find_placeholders(command: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .find_iter(command)
        .map(|m| m.as_str())
        .collect()
}

/// Apply all built-in rules to a catalog.
pub fn apply_builtin_rules(catalog: &Catalog) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    issues.extend(check_duplicate_command_ids(catalog));
    issues.extend(check_duplicate_scenario_ids(catalog));
    issues.extend(check_unknown_command_refs(catalog));
    issues.extend(check_empty_scenarios(catalog));
    issues.extend(check_undeclared_placeholders(catalog));
    issues.extend(check_unused_variables(catalog));
    issues.extend(check_tag_case(catalog));

    issues
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.filter(|id| !seen.insert(*id) && reported.insert(*id))
        .collect()
}

fn check_duplicate_command_ids(catalog: &Catalog) -> Vec<LintIssue> {
    duplicates(catalog.commands().all().iter().map(|c| c.id.as_str()))
        .into_iter()
        .map(|id| LintIssue {
            code: "duplicate-command-id".to_string(),
            message: format!("Command id '{}' is defined more than once", id),
            suggestion: Some("Only the first definition is reachable; rename or remove the others".to_string()),
            is_error: true,
            subject: id.to_string(),
        })
        .collect()
}

fn check_duplicate_scenario_ids(catalog: &Catalog) -> Vec<LintIssue> {
    duplicates(catalog.scenarios().all().iter().map(|s| s.id.as_str()))
        .into_iter()
        .map(|id| LintIssue {
            code: "duplicate-scenario-id".to_string(),
            message: format!("Scenario id '{}' is defined more than once", id),
            suggestion: Some("Only the first definition is reachable; rename or remove the others".to_string()),
            is_error: true,
            subject: id.to_string(),
        })
        .collect()
}

fn check_unknown_command_refs(catalog: &Catalog) -> Vec<LintIssue> {
    catalog
        .scenarios()
        .all()
        .iter()
        .flat_map(|scenario| {
            scenario
                .steps
                .iter()
                .enumerate()
                .filter(|(_, step)| !step.resolved)
                .map(move |(index, step)| LintIssue {
                    code: "unknown-command-ref".to_string(),
                    message: format!(
                        "Step {} references unknown command '{}'",
                        index + 1,
                        step.command_id
                    ),
                    suggestion: Some(format!(
                        "The step is shown as '{}{}'",
                        UNKNOWN_COMMAND_PREFIX, step.command_id
                    )),
                    is_error: true,
                    subject: scenario.id.clone(),
                })
        })
        .collect()
}

fn check_empty_scenarios(catalog: &Catalog) -> Vec<LintIssue> {
    catalog
        .scenarios()
        .all()
        .iter()
        .filter(|s| s.steps.is_empty())
        .map(|s| LintIssue {
            code: "empty-scenario".to_string(),
            message: "Scenario has no steps".to_string(),
            suggestion: None,
            is_error: true,
            subject: s.id.clone(),
        })
        .collect()
}

fn check_undeclared_placeholders(catalog: &Catalog) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    for command in catalog.commands().all() {
        let mut reported = HashSet::new();
        for placeholder in find_placeholders(&command.full_command) {
            if !command.variables.iter().any(|v| v == placeholder) && reported.insert(placeholder)
            {
                issues.push(LintIssue {
                    code: "undeclared-placeholder".to_string(),
                    message: format!("Placeholder '{}' is not listed in variables", placeholder),
                    suggestion: Some(format!("Add \"{}\" to variables", placeholder)),
                    is_error: false,
                    subject: command.id.clone(),
                });
            }
        }
    }

    issues
}

fn check_unused_variables(catalog: &Catalog) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    for command in catalog.commands().all() {
        for variable in &command.variables {
            if !command.full_command.contains(variable.as_str()) {
                issues.push(LintIssue {
                    code: "unused-variable".to_string(),
                    message: format!("Variable '{}' does not appear in the command", variable),
                    suggestion: None,
                    is_error: false,
                    subject: command.id.clone(),
                });
            }
        }
    }

    for scenario in catalog.scenarios().all() {
        for step in scenario.steps.iter().filter(|s| s.resolved) {
            for variable in &step.variables {
                if !step.command.contains(variable.as_str()) {
                    issues.push(LintIssue {
                        code: "unused-variable".to_string(),
                        message: format!(
                            "Variable '{}' of step '{}' does not appear in its command",
                            variable, step.command_id
                        ),
                        suggestion: None,
                        is_error: false,
                        subject: scenario.id.clone(),
                    });
                }
            }
        }
    }

    issues
}

fn check_tag_case(catalog: &Catalog) -> Vec<LintIssue> {
    let commands = catalog
        .commands()
        .all()
        .iter()
        .map(|c| (c.id.as_str(), &c.tags));
    let scenarios = catalog
        .scenarios()
        .all()
        .iter()
        .map(|s| (s.id.as_str(), &s.tags));

    commands
        .chain(scenarios)
        .flat_map(|(id, tags)| {
            tags.iter()
                .filter(|tag| tag.to_lowercase() != **tag)
                .map(move |tag| LintIssue {
                    code: "tag-not-lowercase".to_string(),
                    message: format!("Tag '{}' is not lowercase", tag),
                    suggestion: Some(format!("Use '{}'", tag.to_lowercase())),
                    is_error: false,
                    subject: id.to_string(),
                })
        })
        .collect()
}

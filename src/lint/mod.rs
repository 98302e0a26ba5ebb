// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Catalog lint: consistency checks over commands and scenarios.

mod rules;

pub use rules::{apply_builtin_rules, find_placeholders};

use crate::catalog::Catalog;
use crate::cli::args::OutputFormat;
use console::{style, Style};

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Rule code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Whether this is an error (true) or warning (false).
    pub is_error: bool,
    /// Id of the command or scenario the issue is about.
    pub subject: String,
}

impl LintIssue {
    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} [{}] {}",
            prefix,
            code_style.apply_to(&self.code),
            style(&self.subject).cyan(),
            self.message
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "subject": self.subject,
            "message": self.message,
            "suggestion": self.suggestion,
        })
    }
}

/// Result of linting a catalog.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    pub commands: usize,
    pub scenarios: usize,
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    /// Sort issues into errors and warnings.
    pub fn from_issues(commands: usize, scenarios: usize, issues: Vec<LintIssue>) -> Self {
        let (errors, warnings) = issues.into_iter().partition(|issue| issue.is_error);
        Self {
            commands,
            scenarios,
            errors,
            warnings,
        }
    }

    /// Check if the catalog passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!(
            "{} {} commands, {} scenarios: {}",
            status,
            self.commands,
            self.scenarios,
            self.summary()
        );

        for error in &self.errors {
            println!("  {}", error.format());
        }
        for warning in &self.warnings {
            println!("  {}", warning.format());
        }
    }

    fn print_json(&self) {
        let json = serde_json::json!({
            "valid": self.is_valid(),
            "commands": self.commands,
            "scenarios": self.scenarios,
            "errors": self.errors.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

/// Run every rule over a catalog.
pub fn lint_catalog(catalog: &Catalog) -> LintReport {
    let issues = apply_builtin_rules(catalog);
    tracing::debug!("Lint found {} issues", issues.len());
    LintReport::from_issues(catalog.commands().len(), catalog.scenarios().len(), issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(code: &str, is_error: bool) -> LintIssue {
        LintIssue {
            code: code.to_string(),
            message: "Message".to_string(),
            suggestion: Some("Fix it".to_string()),
            is_error,
            subject: "push".to_string(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_clean() {
        let catalog = Catalog::builtin().unwrap();
        let report = lint_catalog(&catalog);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.summary(), "Valid");
    }

    #[test]
    fn test_report_partitions_issues() {
        let report = LintReport::from_issues(
            1,
            0,
            vec![issue("a", true), issue("b", false), issue("c", true)],
        );
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.issue_count(), 3);
        assert_eq!(report.summary(), "Invalid (2 errors, 1 warnings)");
    }

    #[test]
    fn test_warnings_only_is_valid() {
        let report = LintReport::from_issues(1, 0, vec![issue("w", false)]);
        assert!(report.is_valid());
        assert!(report.summary().contains("1 warnings"));
    }

    #[test]
    fn test_issue_format() {
        let formatted = issue("unknown-command-ref", true).format();
        assert!(formatted.contains("unknown-command-ref"));
        assert!(formatted.contains("push"));
        assert!(formatted.contains("Fix it"));
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Prompt templates and prompt assembly for a chat assistant.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// System prompt flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    #[default]
    Default,
    Troubleshooting,
    Workflow,
    Learning,
}

impl PromptTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTemplate::Default => "default",
            PromptTemplate::Troubleshooting => "troubleshooting",
            PromptTemplate::Workflow => "workflow",
            PromptTemplate::Learning => "learning",
        }
    }

    /// The system prompt text.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptTemplate::Default => {
                r#"You are Git King, an expert Git assistant. Help users with Git commands and workflows.

When suggesting actions, you can use this format to create actionable buttons:
:::action{type="checkout", source="main"}:::
:::action{type="merge", source="feature", target="main"}:::
:::action{type="custom", command="git stash pop", label="Restore stash"}:::

Available action types: merge, checkout, commit, push, custom
Be concise and practical. Use code blocks for commands."#
            }
            PromptTemplate::Troubleshooting => {
                "You are Git King, specializing in Git troubleshooting.
Help users recover from common Git mistakes and conflicts.
Always explain the implications of dangerous operations like force push or hard reset.
Provide step-by-step recovery instructions."
            }
            PromptTemplate::Workflow => {
                "You are Git King, a Git workflow expert.
Help users understand and implement Git workflows like:
- Feature branch workflow
- Gitflow
- Trunk-based development
- Fork and pull request workflow

Explain best practices and common pitfalls."
            }
            PromptTemplate::Learning => {
                "You are Git King, a patient Git teacher.
Explain Git concepts clearly with analogies and examples.
Start from basics and build up to advanced topics.
Use diagrams in ASCII art when helpful."
            }
        }
    }
}

impl FromStr for PromptTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PromptTemplate::Default),
            "troubleshooting" => Ok(PromptTemplate::Troubleshooting),
            "workflow" => Ok(PromptTemplate::Workflow),
            "learning" => Ok(PromptTemplate::Learning),
            _ => Err(format!("Unknown prompt template: {}", s)),
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repository context attached to a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub current_branch: Option<String>,
    pub repo_name: Option<String>,
    pub recent_commits: Vec<String>,
    pub staged_files: Vec<String>,
}

impl PromptContext {
    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(branch) = self.current_branch.as_deref().filter(|b| !b.is_empty()) {
            lines.push(format!("Current branch: {}", branch));
        }
        if let Some(repo) = self.repo_name.as_deref().filter(|r| !r.is_empty()) {
            lines.push(format!("Repository: {}", repo));
        }
        if !self.recent_commits.is_empty() {
            lines.push(format!("Recent commits:\n{}", self.recent_commits.join("\n")));
        }
        if !self.staged_files.is_empty() {
            lines.push(format!("Staged files: {}", self.staged_files.join(", ")));
        }

        lines
    }

    /// Whether no field carries anything.
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

/// Prefix the question with a context block when any context is present.
pub fn build_prompt(query: &str, context: Option<&PromptContext>) -> String {
    let lines = context.map(PromptContext::lines).unwrap_or_default();
    if lines.is_empty() {
        query.to_string()
    } else {
        format!("Context:\n{}\n\nQuestion: {}", lines.join("\n"), query)
    }
}

/// Ready-made questions for common situations.
pub fn scenario_prompts() -> &'static [(&'static str, &'static str)] {
    &[
        ("undo-last-commit", "How do I undo my last commit but keep the changes?"),
        ("resolve-conflict", "I have merge conflicts. How do I resolve them step by step?"),
        ("force-update", "How do I force update my local branch with the remote?"),
        ("squash-commits", "How do I squash my last N commits into one?"),
        ("revert-file", "How do I revert a specific file to its state in the last commit?"),
        ("cherry-pick", "How do I cherry-pick a specific commit from another branch?"),
        ("stash-changes", "How do I stash my changes and apply them later?"),
        ("cleanup-branches", "How do I clean up old merged branches?"),
    ]
}

/// Look up a ready-made question by name.
pub fn scenario_prompt(name: &str) -> Option<&'static str> {
    scenario_prompts()
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, prompt)| *prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_context() {
        assert_eq!(build_prompt("How do I rebase?", None), "How do I rebase?");
        assert_eq!(
            build_prompt("How do I rebase?", Some(&PromptContext::default())),
            "How do I rebase?"
        );
    }

    #[test]
    fn test_prompt_with_context() {
        let context = PromptContext {
            current_branch: Some("feature/login".to_string()),
            repo_name: Some("gitking".to_string()),
            recent_commits: vec!["abc123 Add login".to_string(), "def456 Init".to_string()],
            staged_files: vec!["a.rs".to_string(), "b.rs".to_string()],
        };
        let prompt = build_prompt("Should I rebase?", Some(&context));
        assert_eq!(
            prompt,
            "Context:\nCurrent branch: feature/login\nRepository: gitking\n\
             Recent commits:\nabc123 Add login\ndef456 Init\n\
             Staged files: a.rs, b.rs\n\nQuestion: Should I rebase?"
        );
    }

    #[test]
    fn test_empty_branch_is_ignored() {
        let context = PromptContext {
            current_branch: Some(String::new()),
            ..Default::default()
        };
        assert!(context.is_empty());
        assert_eq!(build_prompt("q", Some(&context)), "q");
    }

    #[test]
    fn test_templates() {
        assert!(PromptTemplate::Default.system_prompt().contains(":::action{"));
        assert!(PromptTemplate::Troubleshooting
            .system_prompt()
            .contains("recovery"));
        assert_eq!("Workflow".parse::<PromptTemplate>().unwrap(), PromptTemplate::Workflow);
        assert!("poetry".parse::<PromptTemplate>().is_err());
    }

    #[test]
    fn test_scenario_prompts() {
        assert_eq!(scenario_prompts().len(), 8);
        assert!(scenario_prompt("stash-changes").unwrap().contains("stash"));
        assert!(scenario_prompt("nope").is_none());
    }
}

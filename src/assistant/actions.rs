// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Action directives embedded in assistant replies.
//!
//! Format: `:::action{type="merge", source="dev"}:::`

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

lazy_static! {
    /// A whole directive; group 1 is the property list.
    static ref ACTION_REGEX: Regex = Regex::new(r":::action\{([^}]+)\}:::").unwrap();

    /// One `key="value"` property.
    static ref PROP_REGEX: Regex = Regex::new(r#"(\w+)="([^"]*)""#).unwrap();
}

/// What a directive asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Merge,
    Checkout,
    Commit,
    Push,
    Custom,
    /// Any other `type` value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl ActionKind {
    fn parse(value: &str) -> Self {
        match value {
            "merge" => ActionKind::Merge,
            "checkout" => ActionKind::Checkout,
            "commit" => ActionKind::Commit,
            "push" => ActionKind::Push,
            "custom" => ActionKind::Custom,
            other => ActionKind::Other(other.to_string()),
        }
    }
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBlock {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ActionBlock {
    /// The git command this directive stands for. Unknown kinds give "".
    pub fn command(&self) -> String {
        let source = self.source.as_deref().unwrap_or("");
        match &self.kind {
            ActionKind::Merge => format!("git merge {}", source).trim_end().to_string(),
            ActionKind::Checkout => format!("git checkout {}", source).trim_end().to_string(),
            ActionKind::Push => "git push".to_string(),
            ActionKind::Commit => "git commit -m \"message\"".to_string(),
            ActionKind::Custom => self.command.clone().unwrap_or_default(),
            ActionKind::Other(_) => String::new(),
        }
    }

    /// Display label: the explicit label, else one derived from the kind.
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        let source = self.source.as_deref().unwrap_or("branch");
        match &self.kind {
            ActionKind::Merge => format!("Merge {}", source),
            ActionKind::Checkout => format!("Checkout {}", source),
            ActionKind::Push => "Push changes".to_string(),
            ActionKind::Commit => "Commit changes".to_string(),
            ActionKind::Custom => self
                .command
                .clone()
                .unwrap_or_else(|| "Run command".to_string()),
            ActionKind::Other(_) => "Execute".to_string(),
        }
    }
}

/// Extract every directive with a `type` property, in order.
pub fn parse_action_blocks(text: &str) -> Vec<ActionBlock> {
    ACTION_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let props: HashMap<&str, &str> = PROP_REGEX
                .captures_iter(caps.get(1)?.as_str())
                .filter_map(|p| Some((p.get(1)?.as_str(), p.get(2)?.as_str())))
                .collect();

            let kind = props.get("type")?;
            let prop = |key: &str| props.get(key).map(|v| v.to_string());

            Some(ActionBlock {
                kind: ActionKind::parse(kind),
                source: prop("source"),
                target: prop("target"),
                command: prop("command"),
                label: prop("label"),
            })
        })
        .collect()
}

/// Remove every directive and trim the remainder.
pub fn strip_action_blocks(text: &str) -> String {
    ACTION_REGEX.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_in_order() {
        let reply = r#"Switch first:
:::action{type="checkout", source="main"}:::
then merge:
:::action{type="merge", source="feature", target="main"}:::"#;
        let blocks = parse_action_blocks(reply);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, ActionKind::Checkout);
        assert_eq!(blocks[0].command(), "git checkout main");
        assert_eq!(blocks[1].target.as_deref(), Some("main"));
        assert_eq!(blocks[1].label(), "Merge feature");
    }

    #[test]
    fn test_block_without_type_is_skipped() {
        let blocks = parse_action_blocks(r#":::action{source="main"}::: :::action{type="push"}:::"#);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].command(), "git push");
        assert_eq!(blocks[0].label(), "Push changes");
    }

    #[test]
    fn test_custom_block() {
        let blocks = parse_action_blocks(
            r#":::action{type="custom", command="git stash pop", label="Restore stash"}:::"#,
        );
        assert_eq!(blocks[0].command(), "git stash pop");
        assert_eq!(blocks[0].label(), "Restore stash");

        let bare = parse_action_blocks(r#":::action{type="custom"}:::"#);
        assert_eq!(bare[0].command(), "");
        assert_eq!(bare[0].label(), "Run command");
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let blocks = parse_action_blocks(r#":::action{type="rebase", source="main"}:::"#);
        assert_eq!(blocks[0].kind, ActionKind::Other("rebase".to_string()));
        assert_eq!(blocks[0].command(), "");
        assert_eq!(blocks[0].label(), "Execute");
    }

    #[test]
    fn test_default_labels() {
        let blocks = parse_action_blocks(r#":::action{type="merge"}::: :::action{type="commit"}:::"#);
        assert_eq!(blocks[0].label(), "Merge branch");
        assert_eq!(blocks[0].command(), "git merge");
        assert_eq!(blocks[1].command(), "git commit -m \"message\"");
        assert_eq!(blocks[1].label(), "Commit changes");
    }

    #[test]
    fn test_strip_action_blocks() {
        let reply = "  Run this:\n:::action{type=\"push\"}:::\n";
        assert_eq!(strip_action_blocks(reply), "Run this:");
        assert_eq!(strip_action_blocks("plain"), "plain");
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let blocks = parse_action_blocks(r#":::action{type="push"}:::"#);
        let json = serde_json::to_value(&blocks[0]).unwrap();
        assert_eq!(json["type"], "push");
        assert!(json.get("source").is_none());
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Scenarios (multi-step workflows) and their registry.
//!
//! Steps reference atomic commands by id. A step whose id is missing from
//! the command registry still resolves, to a visible placeholder command.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::command::{AtomicCommand, CommandRegistry};
use super::fallback::{first_resolved, Strategy};
use super::types::{Difficulty, Locale, LocalizedText, ScenarioCategory};

/// Prefix of the command shown for a step whose command id is unknown.
pub const UNKNOWN_COMMAND_PREFIX: &str = "# unknown: ";

/// A scenario step as written in a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioStepRaw {
    /// Id of the referenced atomic command.
    pub command_id: String,

    /// Overrides the command's variables when present.
    #[serde(default)]
    pub variables: Option<Vec<String>>,

    #[serde(default)]
    pub optional: Option<bool>,

    /// Overrides the command's danger flag when present.
    #[serde(default)]
    pub dangerous: Option<bool>,
}

/// A scenario as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRaw {
    pub id: String,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub category: ScenarioCategory,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub steps: Vec<ScenarioStepRaw>,
    #[serde(default)]
    pub notes: Option<LocalizedText>,
}

/// A step joined against the command registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStep {
    pub command_id: String,
    /// Command line to display.
    pub command: String,
    pub description: LocalizedText,
    pub variables: Vec<String>,
    pub optional: bool,
    pub dangerous: bool,
    /// Whether `command_id` was found in the registry.
    pub resolved: bool,
}

impl ResolvedStep {
    /// Description in the given locale.
    pub fn description(&self, locale: Locale) -> &str {
        self.description.get(locale)
    }
}

/// Lookup context for the step fallback chains.
#[derive(Debug, Clone, Copy)]
pub struct StepQuery<'a> {
    pub step: &'a ScenarioStepRaw,
    pub atomic: Option<&'a AtomicCommand>,
}

/// Strategy: the referenced command's full command line.
pub fn atomic_command(query: StepQuery<'_>) -> Option<String> {
    query.atomic.map(|a| a.full_command.clone())
}

/// Strategy: a comment naming the unresolved id.
pub fn unknown_command(query: StepQuery<'_>) -> Option<String> {
    Some(format!("{}{}", UNKNOWN_COMMAND_PREFIX, query.step.command_id))
}

/// Strategy: the referenced command's description.
pub fn atomic_description(query: StepQuery<'_>) -> Option<LocalizedText> {
    query
        .atomic
        .map(|a| a.description.clone())
        .filter(|d| !d.is_empty())
}

/// Strategy: the raw command id as description.
pub fn raw_id_description(query: StepQuery<'_>) -> Option<LocalizedText> {
    Some(LocalizedText::en(query.step.command_id.clone()))
}

/// Strategy: the step's own variables.
pub fn step_variables(query: StepQuery<'_>) -> Option<Vec<String>> {
    query.step.variables.clone()
}

/// Strategy: the referenced command's variables.
pub fn atomic_variables(query: StepQuery<'_>) -> Option<Vec<String>> {
    query.atomic.map(|a| a.variables.clone())
}

/// Strategy: the step's own danger flag.
pub fn step_dangerous(query: StepQuery<'_>) -> Option<bool> {
    query.step.dangerous
}

/// Strategy: the referenced command's danger flag.
pub fn atomic_dangerous(query: StepQuery<'_>) -> Option<bool> {
    query.atomic.map(|a| a.dangerous)
}

impl ResolvedStep {
    /// Resolve a raw step against the registry. Never fails.
    pub fn resolve(raw: &ScenarioStepRaw, commands: &CommandRegistry) -> Self {
        let query = StepQuery {
            step: raw,
            atomic: commands.get_by_id(&raw.command_id),
        };

        let command_chain: [Strategy<StepQuery<'_>, String>; 2] = [atomic_command as _, unknown_command as _];
        let description_chain: [Strategy<StepQuery<'_>, LocalizedText>; 2] =
            [atomic_description as _, raw_id_description as _];
        let variables_chain: [Strategy<StepQuery<'_>, Vec<String>>; 2] =
            [step_variables as _, atomic_variables as _];
        let dangerous_chain: [Strategy<StepQuery<'_>, bool>; 2] = [step_dangerous as _, atomic_dangerous as _];

        Self {
            command_id: raw.command_id.clone(),
            command: first_resolved(&command_chain, query).unwrap_or_default(),
            description: first_resolved(&description_chain, query).unwrap_or_default(),
            variables: first_resolved(&variables_chain, query).unwrap_or_default(),
            optional: raw.optional.unwrap_or(false),
            dangerous: first_resolved(&dangerous_chain, query).unwrap_or(false),
            resolved: query.atomic.is_some(),
        }
    }
}

/// A resolved scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: ScenarioCategory,
    pub icon: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub steps: Vec<ResolvedStep>,
    pub notes: Option<LocalizedText>,
}

impl Scenario {
    /// Resolve a raw scenario and each of its steps.
    pub fn resolve(raw: ScenarioRaw, commands: &CommandRegistry) -> Self {
        let steps = raw
            .steps
            .iter()
            .map(|step| ResolvedStep::resolve(step, commands))
            .collect();

        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            category: raw.category,
            icon: raw.icon,
            tags: raw.tags,
            difficulty: raw.difficulty,
            steps,
            notes: raw.notes.filter(|n| !n.is_empty()),
        }
    }

    /// Title in the given locale.
    pub fn title(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }

    /// Description in the given locale.
    pub fn description(&self, locale: Locale) -> &str {
        self.description.get(locale)
    }

    /// Notes in the given locale, if any.
    pub fn notes(&self, locale: Locale) -> Option<&str> {
        self.notes.as_ref().map(|n| n.get(locale))
    }

    /// Whether any step is dangerous.
    pub fn has_dangerous_steps(&self) -> bool {
        self.steps.iter().any(|s| s.dangerous)
    }

    /// Case-insensitive substring match over title, description, tags and
    /// step commands.
    pub fn matches_substring(&self, query_lower: &str, locale: Locale) -> bool {
        self.title(locale).to_lowercase().contains(query_lower)
            || self.description(locale).to_lowercase().contains(query_lower)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(query_lower))
            || self
                .steps
                .iter()
                .any(|s| s.command.to_lowercase().contains(query_lower))
    }
}

/// Read-only table of scenarios in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
    by_id: HashMap<String, usize>,
}

impl ScenarioRegistry {
    /// Build a registry, resolving every step against `commands`.
    pub fn from_raw(
        raws: impl IntoIterator<Item = ScenarioRaw>,
        commands: &CommandRegistry,
    ) -> Self {
        Self::new(
            raws.into_iter()
                .map(|raw| Scenario::resolve(raw, commands))
                .collect(),
        )
    }

    /// Build a registry from resolved scenarios.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        let mut by_id = HashMap::with_capacity(scenarios.len());
        for (index, scenario) in scenarios.iter().enumerate() {
            by_id.entry(scenario.id.clone()).or_insert(index);
        }
        Self { scenarios, by_id }
    }

    /// All scenarios in insertion order.
    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Look up a scenario by id.
    pub fn get_by_id(&self, id: &str) -> Option<&Scenario> {
        self.by_id.get(id).map(|&index| &self.scenarios[index])
    }

    /// Scenarios of one category, in insertion order.
    pub fn get_by_category(&self, category: ScenarioCategory) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Scenarios of one difficulty, in insertion order.
    pub fn search_by_difficulty(&self, difficulty: Difficulty) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| s.difficulty == Some(difficulty))
            .collect()
    }

    /// Plain substring search. An empty query matches everything.
    pub fn search(&self, query: &str, locale: Locale) -> Vec<&Scenario> {
        let query_lower = query.to_lowercase();
        self.scenarios
            .iter()
            .filter(|s| s.matches_substring(&query_lower, locale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::command::AtomicCommandRaw;
    use crate::catalog::types::CommandCategory;

    fn commands() -> CommandRegistry {
        CommandRegistry::from_raw(vec![
            AtomicCommandRaw {
                id: "checkout-new-branch".to_string(),
                base_command: "git checkout".to_string(),
                params: vec!["-b".to_string(), "<branch-name>".to_string()],
                full_command: None,
                description: LocalizedText::new("Create and switch", "创建并切换"),
                category: CommandCategory::Branch,
                tags: vec!["branch".to_string()],
                variables: vec!["<branch-name>".to_string()],
                dangerous: false,
                notes: None,
            },
            AtomicCommandRaw {
                id: "reset-hard".to_string(),
                base_command: "git reset".to_string(),
                params: vec!["--hard".to_string(), "HEAD~1".to_string()],
                full_command: None,
                description: LocalizedText::en("Discard the last commit"),
                category: CommandCategory::Undo,
                tags: vec!["reset".to_string()],
                variables: Vec::new(),
                dangerous: true,
                notes: None,
            },
        ])
    }

    fn step(id: &str) -> ScenarioStepRaw {
        ScenarioStepRaw {
            command_id: id.to_string(),
            ..Default::default()
        }
    }

    fn scenario(id: &str, steps: Vec<ScenarioStepRaw>) -> ScenarioRaw {
        ScenarioRaw {
            id: id.to_string(),
            title: LocalizedText::new("Start a feature", "开始新功能"),
            description: LocalizedText::en("Branch off and work"),
            category: ScenarioCategory::Start,
            icon: None,
            tags: vec!["branch".to_string()],
            difficulty: Some(Difficulty::Beginner),
            steps,
            notes: None,
        }
    }

    #[test]
    fn test_resolved_step_inherits_from_command() {
        let step = ResolvedStep::resolve(&step("checkout-new-branch"), &commands());
        assert!(step.resolved);
        assert_eq!(step.command, "git checkout -b <branch-name>");
        assert_eq!(step.description(Locale::Zh), "创建并切换");
        assert_eq!(step.variables, vec!["<branch-name>"]);
        assert!(!step.dangerous);
        assert!(!step.optional);
    }

    #[test]
    fn test_step_overrides_take_precedence() {
        let raw = ScenarioStepRaw {
            command_id: "reset-hard".to_string(),
            variables: Some(vec!["<n>".to_string()]),
            optional: Some(true),
            dangerous: Some(false),
        };
        let step = ResolvedStep::resolve(&raw, &commands());
        assert_eq!(step.variables, vec!["<n>"]);
        assert!(step.optional);
        assert!(!step.dangerous);
    }

    #[test]
    fn test_dangerous_defaults_to_command_flag() {
        let step = ResolvedStep::resolve(&step("reset-hard"), &commands());
        assert!(step.dangerous);
    }

    #[test]
    fn test_unknown_command_renders_placeholder() {
        let step = ResolvedStep::resolve(&step("git-frobnicate"), &commands());
        assert!(!step.resolved);
        assert!(step.command.contains("git-frobnicate"));
        assert_eq!(step.command, "# unknown: git-frobnicate");
        assert_eq!(step.description(Locale::En), "git-frobnicate");
        assert_eq!(step.description(Locale::Zh), "git-frobnicate");
        assert!(step.variables.is_empty());
        assert!(!step.dangerous);
    }

    #[test]
    fn test_unknown_command_keeps_step_overrides() {
        let raw = ScenarioStepRaw {
            command_id: "gone".to_string(),
            variables: Some(vec!["<file>".to_string()]),
            optional: None,
            dangerous: Some(true),
        };
        let step = ResolvedStep::resolve(&raw, &commands());
        assert_eq!(step.variables, vec!["<file>"]);
        assert!(step.dangerous);
    }

    #[test]
    fn test_scenario_resolution_keeps_step_order() {
        let registry = ScenarioRegistry::from_raw(
            vec![scenario(
                "feature",
                vec![step("checkout-new-branch"), step("missing"), step("reset-hard")],
            )],
            &commands(),
        );
        let feature = registry.get_by_id("feature").unwrap();
        let ids: Vec<_> = feature.steps.iter().map(|s| s.command_id.as_str()).collect();
        assert_eq!(ids, vec!["checkout-new-branch", "missing", "reset-hard"]);
        assert!(feature.has_dangerous_steps());
    }

    #[test]
    fn test_registry_queries() {
        let mut hotfix = scenario("hotfix", vec![step("reset-hard")]);
        hotfix.category = ScenarioCategory::Fix;
        hotfix.difficulty = Some(Difficulty::Advanced);
        let registry = ScenarioRegistry::from_raw(
            vec![scenario("feature", vec![step("checkout-new-branch")]), hotfix],
            &commands(),
        );

        assert_eq!(registry.get_by_category(ScenarioCategory::Fix).len(), 1);
        assert_eq!(registry.search_by_difficulty(Difficulty::Beginner)[0].id, "feature");
        assert!(registry.search_by_difficulty(Difficulty::Intermediate).is_empty());
        assert_eq!(registry.search("--hard", Locale::En)[0].id, "hotfix");
        assert_eq!(registry.search("开始", Locale::Zh).len(), 2);
        assert!(registry.get_by_id("nope").is_none());
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Section views of the catalog for the home screen.
//!
//! Scenarios are grouped into four fixed sections, commands into seven
//! fixed groups. Empty sections are omitted; order is fixed.

use serde::Serialize;

use crate::catalog::{
    AtomicCommand, CommandCategory, CommandRegistry, Locale, LocalizedText, Scenario,
    ScenarioCategory, ScenarioRegistry,
};
use crate::template::StepView;

/// Tag that routes a scenario to the stash section regardless of category.
pub const STASH_TAG: &str = "stash";

/// Scenario sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Setup,
    Branching,
    CommitUndo,
    Stash,
}

impl SectionKind {
    /// All sections in display order.
    pub fn all() -> &'static [SectionKind] {
        &[
            SectionKind::Setup,
            SectionKind::Branching,
            SectionKind::CommitUndo,
            SectionKind::Stash,
        ]
    }

    /// Localized section title.
    pub fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SectionKind::Setup, Locale::En) => "Setup & Configuration",
            (SectionKind::Setup, Locale::Zh) => "初始化与配置",
            (SectionKind::Branching, Locale::En) => "Branching & Collaboration",
            (SectionKind::Branching, Locale::Zh) => "分支与协作",
            (SectionKind::CommitUndo, Locale::En) => "Commit & Undo",
            (SectionKind::CommitUndo, Locale::Zh) => "提交与撤销",
            (SectionKind::Stash, Locale::En) => "Stash & Restore",
            (SectionKind::Stash, Locale::Zh) => "临时保存与恢复",
        }
    }

    /// Section of a scenario category.
    pub fn for_category(category: ScenarioCategory) -> Self {
        match category {
            ScenarioCategory::Setup | ScenarioCategory::Start => SectionKind::Setup,
            ScenarioCategory::Collaboration | ScenarioCategory::Maintenance => {
                SectionKind::Branching
            }
            ScenarioCategory::Daily | ScenarioCategory::Fix | ScenarioCategory::Release => {
                SectionKind::CommitUndo
            }
        }
    }

    /// Section a scenario belongs to. The stash tag wins over the category.
    pub fn for_scenario(scenario: &Scenario) -> Self {
        if scenario.tags.iter().any(|tag| tag == STASH_TAG) {
            SectionKind::Stash
        } else {
            Self::for_category(scenario.category)
        }
    }
}

/// A scenario projected for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<StepView>,
}

impl ScenarioItem {
    /// Project a scenario into the given locale.
    pub fn from_scenario(scenario: &Scenario, locale: Locale) -> Self {
        Self {
            id: scenario.id.clone(),
            title: scenario.title(locale).to_string(),
            description: scenario.description(locale).to_string(),
            steps: scenario
                .steps
                .iter()
                .map(|step| StepView::from_step(step, locale))
                .collect(),
        }
    }
}

/// A titled group of scenarios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSection {
    pub title: String,
    pub items: Vec<ScenarioItem>,
}

/// Group scenarios into display sections.
pub fn build_scenario_sections(scenarios: &ScenarioRegistry, locale: Locale) -> Vec<ScenarioSection> {
    SectionKind::all()
        .iter()
        .filter_map(|kind| {
            let items: Vec<ScenarioItem> = scenarios
                .all()
                .iter()
                .filter(|s| SectionKind::for_scenario(s) == *kind)
                .map(|s| ScenarioItem::from_scenario(s, locale))
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(ScenarioSection {
                    title: kind.title(locale).to_string(),
                    items,
                })
            }
        })
        .collect()
}

/// A command projected for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandItem {
    pub command: String,
    pub description: String,
}

impl CommandItem {
    pub fn from_command(command: &AtomicCommand, locale: Locale) -> Self {
        Self {
            command: command.full_command.clone(),
            description: command.description(locale).to_string(),
        }
    }
}

/// A titled group of commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandCategorySection {
    pub title: String,
    pub commands: Vec<CommandItem>,
}

/// A static command group.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    pub title: LocalizedText,
    pub categories: &'static [CommandCategory],
}

/// The command groups in display order.
pub fn command_groups() -> Vec<CommandGroup> {
    use CommandCategory::*;

    let group = |en: &str, zh: &str, categories: &'static [CommandCategory]| CommandGroup {
        title: LocalizedText::new(en, zh),
        categories,
    };

    vec![
        group("Basics", "基础命令", &[Config, Init, Commit]),
        group("Branches", "分支管理", &[Branch]),
        group("Remote", "远程操作", &[Remote]),
        group("Inspect & Compare", "查看与对比", &[Diff]),
        group("Undo & Reset", "撤销与回退", &[Undo]),
        group("Tags & Stash", "标签与暂存", &[Stash, Tag]),
        group("Advanced", "高级操作", &[Advanced]),
    ]
}

/// Group commands into display sections.
pub fn build_command_category_sections(
    commands: &CommandRegistry,
    locale: Locale,
) -> Vec<CommandCategorySection> {
    command_groups()
        .into_iter()
        .filter_map(|group| {
            let items: Vec<CommandItem> = group
                .categories
                .iter()
                .flat_map(|category| commands.get_by_category(*category))
                .map(|command| CommandItem::from_command(command, locale))
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(CommandCategorySection {
                    title: group.title.get(locale).to_string(),
                    commands: items,
                })
            }
        })
        .collect()
}

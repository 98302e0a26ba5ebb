// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Terminal and JSON rendering for CLI output.

use console::style;
use serde::Serialize;

use crate::catalog::{AtomicCommand, Locale, ResolvedStep, Scenario};
use crate::search::{highlight_with, highlight_with_markers, CombinedResults, FieldMatch};
use crate::template::StepView;
use crate::view::{CommandCategorySection, ScenarioSection};

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// Highlight spans for the terminal.
pub fn highlight_terminal(text: &str, spans: &[(usize, usize)]) -> String {
    highlight_with(text, spans, |matched| style(matched).yellow().bold().to_string())
}

fn danger_marker(dangerous: bool) -> String {
    if dangerous {
        format!(" {}", style("⚠ dangerous").red().bold())
    } else {
        String::new()
    }
}

fn format_tags(tags: &[String], max_tags: usize) -> String {
    if tags.is_empty() || max_tags == 0 {
        return String::new();
    }
    let shown: Vec<String> = tags
        .iter()
        .take(max_tags)
        .map(|t| format!("#{}", t))
        .collect();
    format!(" {}", style(shown.join(" ")).dim())
}

/// One line per command: command line, description, tags.
pub fn format_command_row(command: &AtomicCommand, locale: Locale, max_tags: usize) -> String {
    format!(
        "  {} {}{}{}\n    {}",
        style(&command.full_command).cyan().bold(),
        style(format!("({})", command.id)).dim(),
        danger_marker(command.dangerous),
        format_tags(&command.tags, max_tags),
        command.description(locale)
    )
}

/// One line per scenario: id, title, step count.
pub fn format_scenario_row(scenario: &Scenario, locale: Locale, max_tags: usize) -> String {
    let difficulty = scenario
        .difficulty
        .map(|d| format!(" [{}]", d))
        .unwrap_or_default();
    format!(
        "  {} {}{}{}{}\n    {}",
        style(scenario.title(locale)).bold(),
        style(format!("({}, {} steps)", scenario.id, scenario.steps.len())).dim(),
        style(difficulty).magenta(),
        danger_marker(scenario.has_dangerous_steps()),
        format_tags(&scenario.tags, max_tags),
        scenario.description(locale)
    )
}

fn section_header(title: &str) {
    println!("\n{}", style(title).green().bold().underlined());
}

/// Print a scenario with already substituted steps.
pub fn print_scenario(scenario: &Scenario, steps: &[StepView], locale: Locale) {
    let icon = scenario
        .icon
        .as_deref()
        .map(|i| format!("{} ", i))
        .unwrap_or_default();
    println!(
        "{}{} {}",
        icon,
        style(scenario.title(locale)).bold(),
        style(format!("[{}]", scenario.category)).dim()
    );
    if !scenario.description(locale).is_empty() {
        println!("{}", scenario.description(locale));
    }
    println!();

    for (index, (step, view)) in scenario.steps.iter().zip(steps).enumerate() {
        println!(
            "{} {}{}",
            style(format!("{:>2}.", index + 1)).dim(),
            style(format!("# {}", view.description)).dim(),
            step_flags(step)
        );
        let command = if step.resolved {
            style(&view.command).cyan().bold()
        } else {
            style(&view.command).red()
        };
        println!("    {}", command);
    }

    if let Some(notes) = scenario.notes(locale) {
        println!("\n{} {}", style("Note:").yellow().bold(), notes);
    }
}

fn step_flags(step: &ResolvedStep) -> String {
    let mut flags = String::new();
    if step.optional {
        flags.push_str(&format!(" {}", style("(optional)").blue()));
    }
    flags.push_str(&danger_marker(step.dangerous));
    flags
}

/// Print a single command with its substituted command line.
pub fn print_command(command: &AtomicCommand, line: &str, locale: Locale) {
    println!(
        "{} {}{}",
        style(line).cyan().bold(),
        style(format!("[{}]", command.category)).dim(),
        danger_marker(command.dangerous)
    );
    println!("{}", command.description(locale));

    if !command.variables.is_empty() {
        println!(
            "{} {}",
            style("Placeholders:").dim(),
            command.variables.join(", ")
        );
    }
    if !command.tags.is_empty() {
        println!("{} {}", style("Tags:").dim(), command.tags.join(", "));
    }
    if let Some(notes) = command.notes(locale) {
        println!("\n{} {}", style("Note:").yellow().bold(), notes);
    }
}

/// Print scenario sections then command sections.
pub fn print_home(scenarios: &[ScenarioSection], commands: &[CommandCategorySection]) {
    for section in scenarios {
        section_header(&section.title);
        for item in &section.items {
            println!(
                "  {} {}",
                style(&item.title).bold(),
                style(format!("({})", item.id)).dim()
            );
            if !item.description.is_empty() {
                println!("    {}", style(&item.description).dim());
            }
        }
    }

    for section in commands {
        section_header(&section.title);
        for item in &section.commands {
            println!(
                "  {:<44} {}",
                style(&item.command).cyan(),
                style(&item.description).dim()
            );
        }
    }
}

fn match_for<'m>(matches: &'m [FieldMatch], key: &str) -> Option<&'m FieldMatch> {
    matches.iter().find(|m| m.key == key)
}

fn highlighted_or_plain(matches: &[FieldMatch], key: &str, text: &str) -> String {
    match match_for(matches, key) {
        Some(m) if m.value == text => highlight_terminal(text, &m.spans),
        _ => text.to_string(),
    }
}

/// Print fuzzy search results with highlighted matches.
pub fn print_search_results(results: &CombinedResults<'_>, locale: Locale, max_tags: usize) {
    if !results.scenarios.is_empty() {
        section_header("Scenarios");
        for hit in &results.scenarios {
            let scenario = hit.item;
            println!(
                "  {} {} {}",
                highlighted_or_plain(&hit.matches, "title", scenario.title(locale)),
                style(format!("({})", scenario.id)).dim(),
                style(format!("{:.3}", hit.score)).dim()
            );
            println!(
                "    {}{}",
                highlighted_or_plain(&hit.matches, "description", scenario.description(locale)),
                format_tags(&scenario.tags, max_tags)
            );
        }
    }

    if !results.commands.is_empty() {
        section_header("Commands");
        for hit in &results.commands {
            let command = hit.item;
            println!(
                "  {} {}{} {}",
                highlighted_or_plain(&hit.matches, "command", &command.full_command),
                style(format!("({})", command.id)).dim(),
                danger_marker(command.dangerous),
                style(format!("{:.3}", hit.score)).dim()
            );
            println!(
                "    {}{}",
                highlighted_or_plain(&hit.matches, "description", command.description(locale)),
                format_tags(&command.tags, max_tags)
            );
        }
    }
}

/// JSON form of a match, with the value highlighted using the given markers.
pub fn match_json(m: &FieldMatch, open: &str, close: &str) -> serde_json::Value {
    serde_json::json!({
        "key": m.key,
        "value": m.value,
        "ref_index": m.ref_index,
        "spans": m.spans,
        "highlighted": highlight_with_markers(&m.value, &m.spans, open, close),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_format_tags_caps_count() {
        console::set_colors_enabled(false);
        let tags = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(format_tags(&tags, 2), " #a #b");
        assert_eq!(format_tags(&tags, 0), "");
        assert_eq!(format_tags(&[], 3), "");
    }

    #[test]
    fn test_command_row_contains_fields() {
        console::set_colors_enabled(false);
        let catalog = Catalog::builtin().unwrap();
        let push_force = catalog.commands().get_by_id("push-force").unwrap();
        let row = format_command_row(push_force, Locale::En, 3);
        assert!(row.contains("git push --force-with-lease"));
        assert!(row.contains("(push-force)"));
        assert!(row.contains("dangerous"));
    }

    #[test]
    fn test_highlight_terminal_plain_without_colors() {
        console::set_colors_enabled(false);
        assert_eq!(highlight_terminal("git push", &[(4, 7)]), "git push");
    }

    #[test]
    fn test_match_json_highlights() {
        let m = FieldMatch {
            key: "command",
            value: "git push".to_string(),
            ref_index: None,
            spans: vec![(4, 7)],
        };
        let json = match_json(&m, "[", "]");
        assert_eq!(json["highlighted"], "git [push]");
        assert!(json["ref_index"].is_null());
    }
}

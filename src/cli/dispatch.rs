// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::assistant::{
    build_prompt, parse_action_blocks, scenario_prompt, scenario_prompts, strip_action_blocks,
    PromptContext,
};
use crate::catalog::{Catalog, Locale};
use crate::config::GkConfig;
use crate::error::{CatalogError, ConfigError, GkError, Result, ResultExt, StoreError};
use crate::lint::lint_catalog;
use crate::search::{CatalogSearch, SearchHit};
use crate::store::{HistoryKind, VariableStore};
use crate::template::{
    format_script, format_with_comment, substitute, substitute_sequence, unique_variables, StepView,
};
use crate::view::{build_command_category_sections, build_scenario_sections};

use super::args::{
    parse_assignment, AssistantAction, AssistantArgs, Cli, Commands, CommandsArgs, ConfigPreset,
    ConfigureArgs, InitArgs, LintArgs, OutputFormat, ScenariosArgs, SearchArgs, ShowArgs,
    VarsAction, VarsArgs,
};
use super::render;

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GkConfig::load_from(config_path)?
    } else {
        GkConfig::load()?
    };

    if cli.no_color || !config.ui.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let locale = cli.locale.unwrap_or(config.ui.locale);
    tracing::debug!("Using locale {}", locale);

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Home => run_home(&cli, &config, locale),
        Commands::Commands(args) => run_commands(&cli, &config, locale, args),
        Commands::Scenarios(args) => run_scenarios(&cli, &config, locale, args),
        Commands::Show(args) => run_show(&cli, &config, locale, args),
        Commands::Search(args) => run_search(&cli, &config, locale, args),
        Commands::Configure(args) => run_configure(&cli, &config, locale, args),
        Commands::Vars(args) => run_vars(&cli, &config, args),
        Commands::Lint(args) => run_lint(&cli, &config, args),
        Commands::Assistant(args) => run_assistant(&cli, args),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(&cli, args),
    }
}

fn is_json(cli: &Cli) -> bool {
    cli.format == Some(OutputFormat::Json)
}

/// Parse `--set` assignments into a map.
fn parse_assignments(sets: &[String]) -> Result<BTreeMap<String, String>> {
    sets.iter()
        .map(|input| {
            parse_assignment(input).ok_or_else(|| {
                GkError::Store(StoreError::InvalidAssignment {
                    input: input.clone(),
                })
            })
        })
        .collect()
}

/// Remembered values, or nothing when the store cannot be read.
fn saved_values(config: &GkConfig) -> BTreeMap<String, String> {
    match VariableStore::open(&config.store) {
        Ok(store) => store.snapshot(),
        Err(e) => {
            tracing::warn!("Ignoring variable store: {}", e);
            BTreeMap::new()
        }
    }
}

/// Run the home command.
fn run_home(cli: &Cli, config: &GkConfig, locale: Locale) -> Result<()> {
    tracing::debug!("Running home command");

    let catalog = Catalog::load(config)?;
    let scenarios = build_scenario_sections(catalog.scenarios(), locale);
    let commands = build_command_category_sections(catalog.commands(), locale);

    if is_json(cli) {
        render::print_json(&serde_json::json!({
            "scenarios": scenarios,
            "commands": commands,
        }));
    } else {
        render::print_home(&scenarios, &commands);
    }

    Ok(())
}

/// Run the commands command.
fn run_commands(cli: &Cli, config: &GkConfig, locale: Locale, args: CommandsArgs) -> Result<()> {
    tracing::debug!("Running commands command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let registry = catalog.commands();
    let commands: Vec<_> = registry
        .search(args.filter.as_deref().unwrap_or(""), locale)
        .into_iter()
        .filter(|c| args.category.map_or(true, |category| c.category == category))
        .collect();

    if is_json(cli) {
        render::print_json(&commands);
        return Ok(());
    }

    if commands.is_empty() {
        println!("{}", style("No commands found").dim());
    }
    for command in commands {
        println!("{}", render::format_command_row(command, locale, config.ui.max_tags));
    }

    Ok(())
}

/// Run the scenarios command.
fn run_scenarios(cli: &Cli, config: &GkConfig, locale: Locale, args: ScenariosArgs) -> Result<()> {
    tracing::debug!("Running scenarios command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let registry = catalog.scenarios();
    let by_difficulty = args.difficulty.map(|d| registry.search_by_difficulty(d));
    let scenarios: Vec<_> = registry
        .search(args.filter.as_deref().unwrap_or(""), locale)
        .into_iter()
        .filter(|s| args.category.map_or(true, |category| s.category == category))
        .filter(|s| {
            by_difficulty
                .as_ref()
                .map_or(true, |allowed| allowed.iter().any(|a| a.id == s.id))
        })
        .collect();

    if is_json(cli) {
        render::print_json(&scenarios);
        return Ok(());
    }

    if scenarios.is_empty() {
        println!("{}", style("No scenarios found").dim());
    }
    for scenario in scenarios {
        println!("{}", render::format_scenario_row(scenario, locale, config.ui.max_tags));
    }

    Ok(())
}

/// Run the show command.
fn run_show(cli: &Cli, config: &GkConfig, locale: Locale, args: ShowArgs) -> Result<()> {
    tracing::debug!("Running show command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let mut values = saved_values(config);
    values.extend(parse_assignments(&args.set)?);

    if let Some(scenario) = catalog.scenarios().get_by_id(&args.id) {
        let views: Vec<StepView> = scenario
            .steps
            .iter()
            .map(|step| StepView::from_step(step, locale))
            .collect();
        let steps = substitute_sequence(&views, &values);

        if args.script {
            println!("{}", format_script(&steps));
        } else if is_json(cli) {
            render::print_json(&serde_json::json!({
                "kind": "scenario",
                "id": scenario.id,
                "title": scenario.title(locale),
                "description": scenario.description(locale),
                "variables": unique_variables(&scenario.steps),
                "steps": steps,
                "notes": scenario.notes(locale),
            }));
        } else {
            render::print_scenario(scenario, &steps, locale);
        }
        return Ok(());
    }

    if let Some(command) = catalog.commands().get_by_id(&args.id) {
        let line = substitute(&command.full_command, &values);
        let description = command.description(locale);

        if args.script {
            println!("{}", format_with_comment(&line, Some(description)));
        } else if is_json(cli) {
            render::print_json(&serde_json::json!({
                "kind": "command",
                "id": command.id,
                "command": line,
                "description": description,
                "variables": command.variables,
                "dangerous": command.dangerous,
                "notes": command.notes(locale),
            }));
        } else {
            render::print_command(command, &line, locale);
        }
        return Ok(());
    }

    Err(GkError::Catalog(CatalogError::UnknownId { id: args.id }))
}

fn hit_json<T>(
    hit: &SearchHit<'_, T>,
    id: &str,
    label: &str,
    config: &GkConfig,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "label": label,
        "score": hit.score,
        "matches": hit
            .matches
            .iter()
            .map(|m| render::match_json(m, &config.ui.highlight_open, &config.ui.highlight_close))
            .collect::<Vec<_>>(),
    })
}

/// Run the search command.
fn run_search(cli: &Cli, config: &GkConfig, locale: Locale, args: SearchArgs) -> Result<()> {
    tracing::debug!("Running search command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let limit = args.limit.unwrap_or(config.search.max_results);

    if args.simple {
        let commands: Vec<_> = catalog
            .commands()
            .search(&args.query, locale)
            .into_iter()
            .take(limit)
            .collect();
        let scenarios: Vec<_> = catalog
            .scenarios()
            .search(&args.query, locale)
            .into_iter()
            .take(limit)
            .collect();

        if is_json(cli) {
            render::print_json(&serde_json::json!({
                "commands": commands,
                "scenarios": scenarios,
            }));
        } else {
            if commands.is_empty() && scenarios.is_empty() {
                println!("{}", style("No results").dim());
            }
            for scenario in scenarios {
                println!("{}", render::format_scenario_row(scenario, locale, config.ui.max_tags));
            }
            for command in commands {
                println!("{}", render::format_command_row(command, locale, config.ui.max_tags));
            }
        }
        return Ok(());
    }

    let search = CatalogSearch::new(&catalog, &config.search, locale);
    let results = search.combined_search(&args.query, limit);
    let suggestions = search.search_suggestions(&args.query, config.search.suggestion_limit);

    if is_json(cli) {
        render::print_json(&serde_json::json!({
            "query": args.query,
            "commands": results
                .commands
                .iter()
                .map(|hit| hit_json(hit, &hit.item.id, &hit.item.full_command, config))
                .collect::<Vec<_>>(),
            "scenarios": results
                .scenarios
                .iter()
                .map(|hit| hit_json(hit, &hit.item.id, hit.item.title(locale), config))
                .collect::<Vec<_>>(),
            "suggestions": suggestions,
        }));
        return Ok(());
    }

    if results.is_empty() {
        println!("{} {}", style("No results for").dim(), style(&args.query).bold());
    } else {
        render::print_search_results(&results, locale, config.ui.max_tags);
    }

    if !suggestions.is_empty() {
        println!(
            "\n{} {}",
            style("Related tags:").dim(),
            suggestions
                .iter()
                .map(|s| style(s).cyan().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

/// Run the configure command.
fn run_configure(cli: &Cli, config: &GkConfig, locale: Locale, args: ConfigureArgs) -> Result<()> {
    tracing::debug!("Running configure command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let preset = parse_assignments(&args.set)?;
    let mut store = VariableStore::open(&config.store)?;

    let (views, variables, dangerous) =
        if let Some(scenario) = catalog.scenarios().get_by_id(&args.id) {
            let views: Vec<StepView> = scenario
                .steps
                .iter()
                .map(|step| StepView::from_step(step, locale))
                .collect();
            (
                views,
                unique_variables(&scenario.steps),
                scenario.has_dangerous_steps(),
            )
        } else if let Some(command) = catalog.commands().get_by_id(&args.id) {
            (
                vec![StepView {
                    command: command.full_command.clone(),
                    description: command.description(locale).to_string(),
                }],
                command.variables.clone(),
                command.dangerous,
            )
        } else {
            return Err(GkError::Catalog(CatalogError::UnknownId { id: args.id }));
        };

    let interactive = !cli.non_interactive;
    let term = Term::stderr();
    let theme = ColorfulTheme::default();

    if interactive && dangerous {
        term.write_line(&format!(
            "{} {}",
            style("⚠").yellow().bold(),
            style("This workflow contains commands that rewrite or discard history").yellow()
        ))?;
        let proceed = Confirm::with_theme(&theme)
            .with_prompt("Continue?")
            .default(true)
            .interact()?;
        if !proceed {
            return Err(GkError::Cancelled);
        }
    }

    let mut values = BTreeMap::new();
    for variable in &variables {
        let history = HistoryKind::for_placeholder(variable)
            .map(|kind| store.history(kind).entries().to_vec())
            .unwrap_or_default();
        let default = preset
            .get(variable)
            .cloned()
            .or_else(|| store.get(variable).map(str::to_string))
            .or_else(|| history.first().cloned());

        let value = if interactive && !preset.contains_key(variable) {
            if history.len() > 1 {
                term.write_line(&format!(
                    "  {} {}",
                    style("recent:").dim(),
                    style(history.join(", ")).dim()
                ))?;
            }
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(variable.as_str())
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default);
            }
            input.interact_text()?
        } else {
            default.unwrap_or_default()
        };

        let value = value.trim().to_string();
        if !value.is_empty() {
            values.insert(variable.clone(), value);
        }
    }

    if args.should_save() && !values.is_empty() {
        for (variable, value) in &values {
            store.set(variable, value);
            if let Some(kind) = HistoryKind::for_placeholder(variable) {
                store.add_to_history(kind, value);
            }
        }
        store.save()?;
        tracing::debug!("Saved {} values to {:?}", values.len(), store.path());
    }

    let steps = substitute_sequence(&views, &values);
    if is_json(cli) {
        render::print_json(&serde_json::json!({
            "id": args.id,
            "values": values,
            "steps": steps,
        }));
    } else {
        println!("{}", format_script(&steps));
    }

    Ok(())
}

/// Run the vars command.
fn run_vars(cli: &Cli, config: &GkConfig, args: VarsArgs) -> Result<()> {
    tracing::debug!("Running vars command with args: {:?}", args);

    let mut store = VariableStore::open(&config.store)?;

    match args.action {
        VarsAction::List => {
            if is_json(cli) {
                render::print_json(store.variables());
            } else if store.variables().is_empty() {
                println!("{}", style("No remembered values").dim());
            } else {
                for (key, variable) in store.variables() {
                    println!(
                        "{} = {} {}",
                        style(key).cyan(),
                        variable.value,
                        style(variable.last_used.format("%Y-%m-%d %H:%M")).dim()
                    );
                }
            }
        }
        VarsAction::Set { key, value } => {
            if value.trim().is_empty() {
                return Err(GkError::Store(StoreError::InvalidAssignment {
                    input: format!("{}=", key),
                }));
            }
            store.set(&key, &value);
            if let Some(kind) = HistoryKind::for_placeholder(&key) {
                store.add_to_history(kind, &value);
            }
            store.save()?;
            println!("✓ Saved {}", key);
        }
        VarsAction::Unset { key } => {
            if store.delete(&key) {
                store.save()?;
                println!("✓ Removed {}", key);
            } else {
                println!("{} {}", style("No value stored for").dim(), key);
            }
        }
        VarsAction::Clear { history } => {
            if history {
                store.clear_all_history();
                println!("✓ Cleared history");
            } else {
                store.clear();
                println!("✓ Cleared remembered values");
            }
            store.save()?;
        }
        VarsAction::History { kind, query } => {
            let kinds: Vec<HistoryKind> = match kind {
                Some(kind) => vec![kind],
                None => HistoryKind::all().to_vec(),
            };
            let query = query.unwrap_or_default();
            let lists: BTreeMap<&str, Vec<String>> = kinds
                .iter()
                .map(|kind| (kind.as_str(), store.suggestions(*kind, &query)))
                .collect();

            if is_json(cli) {
                render::print_json(&lists);
            } else {
                for kind in &kinds {
                    println!("{}", style(kind.as_str()).green().bold());
                    for entry in &lists[kind.as_str()] {
                        println!("  {}", entry);
                    }
                }
            }
        }
        VarsAction::Reset => {
            store.reset();
            store.save()?;
            println!("✓ Reset variable store");
        }
    }

    Ok(())
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &GkConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let catalog = Catalog::load(config)?;
    let report = lint_catalog(&catalog);
    report.print(cli.format);

    if !report.is_valid() || (args.strict && !report.warnings.is_empty()) {
        let count = if args.strict {
            report.issue_count()
        } else {
            report.errors.len()
        };
        Err(GkError::Catalog(CatalogError::LintFailed { count }))
    } else {
        Ok(())
    }
}

/// Run the assistant command.
fn run_assistant(cli: &Cli, args: AssistantArgs) -> Result<()> {
    tracing::debug!("Running assistant command");

    match args.action {
        AssistantAction::Prompt {
            question,
            canned,
            template,
            branch,
            repo,
            commits,
            staged,
            system,
        } => {
            let question = match (question, canned) {
                (Some(question), _) => question,
                (None, Some(name)) => scenario_prompt(&name)
                    .map(str::to_string)
                    .ok_or_else(|| GkError::WithContext {
                        context: "assistant".to_string(),
                        message: format!("Unknown question '{}'", name),
                    })?,
                (None, None) => {
                    return Err(GkError::WithContext {
                        context: "assistant".to_string(),
                        message: "A question is required".to_string(),
                    })
                }
            };

            let context = PromptContext {
                current_branch: branch,
                repo_name: repo,
                recent_commits: commits,
                staged_files: staged,
            };
            let prompt = build_prompt(&question, Some(&context));

            if is_json(cli) {
                render::print_json(&serde_json::json!({
                    "template": template.as_str(),
                    "system": template.system_prompt(),
                    "prompt": prompt,
                }));
            } else {
                if system {
                    println!("{}\n", template.system_prompt());
                }
                println!("{}", prompt);
            }
        }
        AssistantAction::Actions { file, strip } => {
            let reply = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .context(format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let actions = parse_action_blocks(&reply);
            tracing::debug!("Found {} action directives", actions.len());

            if strip {
                println!("{}", strip_action_blocks(&reply));
            } else if is_json(cli) {
                let json: Vec<_> = actions
                    .iter()
                    .map(|action| {
                        serde_json::json!({
                            "action": action,
                            "label": action.label(),
                            "command": action.command(),
                        })
                    })
                    .collect();
                render::print_json(&json);
            } else {
                for action in &actions {
                    println!(
                        "{} {}",
                        style(action.label()).bold(),
                        style(action.command()).cyan()
                    );
                }
            }
        }
        AssistantAction::Questions => {
            if is_json(cli) {
                let json: BTreeMap<_, _> = scenario_prompts().iter().copied().collect();
                render::print_json(&json);
            } else {
                for (name, text) in scenario_prompts() {
                    println!("{:<18} {}", style(name).cyan(), text);
                }
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("gk {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(_cli: &Cli, args: InitArgs) -> Result<()> {
    use crate::config::default::{example_config, minimal_config, standard_config};

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("gitking.toml");

    if config_path.exists() && !args.force {
        return Err(GkError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    let config_content = match args.preset {
        Some(ConfigPreset::Minimal) => minimal_config(),
        Some(ConfigPreset::Standard) => standard_config(),
        Some(ConfigPreset::Full) | None => example_config(),
    };

    std::fs::write(config_path, config_content).context("Failed to write configuration")?;

    println!("✓ Created gitking.toml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        let sets = vec!["<branch-name>=topic".to_string(), "<n>=3".to_string()];
        let map = parse_assignments(&sets).unwrap();
        assert_eq!(map.get("<branch-name>").map(String::as_str), Some("topic"));
        assert_eq!(map.get("<n>").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_parse_assignments_rejects_missing_equals() {
        let err = parse_assignments(&["novalue".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            GkError::Store(StoreError::InvalidAssignment { .. })
        ));
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assistant::PromptTemplate;
use crate::catalog::{CommandCategory, Difficulty, Locale, ScenarioCategory};
use crate::store::HistoryKind;

/// GK - Git command and workflow reference
///
/// Browse atomic Git commands and multi-step scenarios, search them with
/// typo tolerance, and fill in placeholders from remembered values.
#[derive(Parser, Debug)]
#[command(name = "gk")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Git command and workflow reference", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to home if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable all interactive prompts
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Display language (en, zh)
    #[arg(short, long, global = true, value_parser = parse_locale)]
    pub locale: Option<Locale>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scenario sections and command groups (default command)
    Home,

    /// List atomic commands
    Commands(CommandsArgs),

    /// List scenarios
    Scenarios(ScenariosArgs),

    /// Show a scenario or command with placeholders filled in
    Show(ShowArgs),

    /// Fuzzy search over commands and scenarios
    Search(SearchArgs),

    /// Fill in a scenario's placeholders and print the script
    Configure(ConfigureArgs),

    /// Manage remembered placeholder values and history
    Vars(VarsArgs),

    /// Check the catalog for broken references and placeholders
    Lint(LintArgs),

    /// Build assistant prompts and read action directives
    Assistant(AssistantArgs),

    /// Print version information
    Version,

    /// Initialize gitking configuration
    Init(InitArgs),
}

/// Arguments for the commands command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CommandsArgs {
    /// Only commands of this category
    #[arg(long, value_parser = parse_command_category)]
    pub category: Option<CommandCategory>,

    /// Case-insensitive substring filter
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the scenarios command.
#[derive(Parser, Debug, Default, Clone)]
pub struct ScenariosArgs {
    /// Only scenarios of this category
    #[arg(long, value_parser = parse_scenario_category)]
    pub category: Option<ScenarioCategory>,

    /// Only scenarios of this difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Case-insensitive substring filter
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the show command.
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Scenario or command id
    pub id: String,

    /// Placeholder value, e.g. --set "<branch-name>=feature/login"
    #[arg(short, long, value_name = "PLACEHOLDER=VALUE")]
    pub set: Vec<String>,

    /// Print only the commented script
    #[arg(long)]
    pub script: bool,
}

/// Arguments for the search command.
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Maximum results per kind
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Plain substring search instead of fuzzy ranking
    #[arg(long)]
    pub simple: bool,
}

/// Arguments for the configure command.
#[derive(Parser, Debug, Clone)]
pub struct ConfigureArgs {
    /// Scenario id
    pub id: String,

    /// Placeholder value used instead of prompting
    #[arg(short, long, value_name = "PLACEHOLDER=VALUE")]
    pub set: Vec<String>,

    /// Remember entered values (default)
    #[arg(long, overrides_with = "no_save")]
    pub save: bool,

    /// Do not remember entered values
    #[arg(long, overrides_with = "save")]
    pub no_save: bool,
}

impl ConfigureArgs {
    /// Whether entered values should be stored.
    pub fn should_save(&self) -> bool {
        !self.no_save
    }
}

/// Arguments for the vars command.
#[derive(Parser, Debug, Clone)]
pub struct VarsArgs {
    /// Store action to perform
    #[command(subcommand)]
    pub action: VarsAction,
}

/// Variable store actions.
#[derive(Subcommand, Debug, Clone)]
pub enum VarsAction {
    /// List remembered values
    List,

    /// Remember a value for a placeholder
    Set {
        /// Placeholder, e.g. "<branch-name>"
        key: String,

        /// Value to remember
        value: String,
    },

    /// Forget a placeholder value
    Unset {
        /// Placeholder to forget
        key: String,
    },

    /// Forget all values (or all history with --history)
    Clear {
        /// Clear history lists instead of values
        #[arg(long)]
        history: bool,
    },

    /// Show recent branch names, commit messages or tags
    History {
        /// History to show (all if omitted)
        #[arg(value_enum)]
        kind: Option<HistoryKind>,

        /// Only entries containing this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Drop every value and history list
    Reset,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the assistant command.
#[derive(Parser, Debug, Clone)]
pub struct AssistantArgs {
    /// Assistant action to perform
    #[command(subcommand)]
    pub action: AssistantAction,
}

/// Assistant actions.
#[derive(Subcommand, Debug, Clone)]
pub enum AssistantAction {
    /// Build a prompt with repository context
    Prompt {
        /// The question to ask
        #[arg(required_unless_present = "canned")]
        question: Option<String>,

        /// Use a ready-made question instead (see `assistant questions`)
        #[arg(long, conflicts_with = "question")]
        canned: Option<String>,

        /// System prompt flavour
        #[arg(short, long, value_enum, default_value = "default")]
        template: PromptTemplate,

        /// Current branch name
        #[arg(long)]
        branch: Option<String>,

        /// Repository name
        #[arg(long)]
        repo: Option<String>,

        /// Recent commit line (repeatable)
        #[arg(long = "commit", value_name = "LINE")]
        commits: Vec<String>,

        /// Staged file (repeatable)
        #[arg(long = "staged", value_name = "FILE")]
        staged: Vec<String>,

        /// Also print the system prompt
        #[arg(long)]
        system: bool,
    },

    /// Parse action directives from an assistant reply
    Actions {
        /// File holding the reply (stdin if omitted)
        file: Option<PathBuf>,

        /// Print the reply with directives removed
        #[arg(long)]
        strip: bool,
    },

    /// List ready-made questions
    Questions,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long)]
    pub preset: Option<ConfigPreset>,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Minimal configuration
    Minimal,
    /// Standard configuration (recommended)
    Standard,
    /// Full configuration with all options
    Full,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse()
        .map_err(|_| format!("unknown locale '{}' (expected en or zh)", s))
}

fn parse_command_category(s: &str) -> Result<CommandCategory, String> {
    s.parse().map_err(|_| {
        let known: Vec<_> = CommandCategory::all().iter().map(|c| c.as_str()).collect();
        format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
    })
}

fn parse_scenario_category(s: &str) -> Result<ScenarioCategory, String> {
    s.parse()
        .map_err(|_| format!("unknown scenario category '{}'", s))
}

/// Split a `PLACEHOLDER=VALUE` assignment at the first `=`; values may
/// contain further `=` characters.
pub fn parse_assignment(input: &str) -> Option<(String, String)> {
    let (key, value) = input.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

impl Cli {
    /// Get the effective command, defaulting to Home if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["gk"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Home));
    }

    #[test]
    fn test_parse_commands_filter() {
        let args = Cli::parse_from(["gk", "commands", "--category", "branch", "-f", "delete"]);
        if let Some(Commands::Commands(cmd)) = args.command {
            assert_eq!(cmd.category, Some(CommandCategory::Branch));
            assert_eq!(cmd.filter.as_deref(), Some("delete"));
        } else {
            panic!("Expected Commands command");
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["gk", "commands", "--category", "nope"]).is_err());
    }

    #[test]
    fn test_parse_show_with_sets() {
        let args = Cli::parse_from([
            "gk",
            "show",
            "feature-branch",
            "--set",
            "<branch-name>=topic",
            "-s",
            "message=a=b",
        ]);
        if let Some(Commands::Show(show)) = args.command {
            assert_eq!(show.id, "feature-branch");
            assert_eq!(show.set.len(), 2);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("<branch-name>=topic"),
            Some(("<branch-name>".to_string(), "topic".to_string()))
        );
        assert_eq!(
            parse_assignment("message=a=b"),
            Some(("message".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("Your Name="),
            Some(("Your Name".to_string(), String::new()))
        );
        assert!(parse_assignment("novalue").is_none());
        assert!(parse_assignment("=value").is_none());
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["gk", "--locale", "zh", "--format", "json", "lint"]);
        assert_eq!(args.locale, Some(Locale::Zh));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(Cli::try_parse_from(["gk", "--locale", "fr", "home"]).is_err());
    }

    #[test]
    fn test_configure_save_flags() {
        let args = Cli::parse_from(["gk", "configure", "daily-commit"]);
        if let Some(Commands::Configure(c)) = args.command {
            assert!(c.should_save());
        } else {
            panic!("Expected Configure command");
        }

        let args = Cli::parse_from(["gk", "configure", "daily-commit", "--no-save"]);
        if let Some(Commands::Configure(c)) = args.command {
            assert!(!c.should_save());
        } else {
            panic!("Expected Configure command");
        }
    }

    #[test]
    fn test_parse_vars_history() {
        let args = Cli::parse_from(["gk", "vars", "history", "branch", "-q", "feat"]);
        if let Some(Commands::Vars(VarsArgs {
            action: VarsAction::History { kind, query },
        })) = args.command
        {
            assert_eq!(kind, Some(HistoryKind::Branch));
            assert_eq!(query.as_deref(), Some("feat"));
        } else {
            panic!("Expected vars history");
        }
    }

    #[test]
    fn test_parse_assistant_prompt() {
        let args = Cli::parse_from([
            "gk",
            "assistant",
            "prompt",
            "How do I rebase?",
            "--template",
            "learning",
            "--branch",
            "main",
        ]);
        assert!(matches!(args.command, Some(Commands::Assistant(_))));

        assert!(Cli::try_parse_from(["gk", "assistant", "prompt"]).is_err());
        assert!(Cli::try_parse_from(["gk", "assistant", "prompt", "--canned", "cherry-pick"]).is_ok());
    }
}

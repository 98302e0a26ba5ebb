// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Shared catalog vocabulary: locales, localized text and the closed
//! category enumerations.

use serde::{Deserialize, Serialize};

use super::fallback::{first_resolved, Strategy};

/// A display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (the default locale).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// The locale every localized field falls back to.
    pub const DEFAULT: Locale = Locale::En;

    /// Get the string representation of the locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            "zh" | "cn" | "zh-cn" | "zh-hans" | "chinese" => Ok(Locale::Zh),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text with per-locale variants.
///
/// Catalog files write it as an inline table: `{ en = "...", zh = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
}

/// Lookup context for the locale fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct LocaleQuery<'a> {
    pub text: &'a LocalizedText,
    pub locale: Locale,
}

impl LocalizedText {
    /// Create text that only has an English variant.
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            en: Some(text.into()),
            zh: None,
        }
    }

    /// Create text with both variants.
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: Some(en.into()),
            zh: Some(zh.into()),
        }
    }

    /// The raw variant for a locale, if populated.
    pub fn variant(&self, locale: Locale) -> Option<&str> {
        let value = match locale {
            Locale::En => self.en.as_deref(),
            Locale::Zh => self.zh.as_deref(),
        };
        value.filter(|s| !s.trim().is_empty())
    }

    /// Whether no locale carries any text.
    pub fn is_empty(&self) -> bool {
        self.variant(Locale::En).is_none() && self.variant(Locale::Zh).is_none()
    }

    /// Resolve the text for a locale.
    ///
    /// Tries the requested locale, then [`Locale::DEFAULT`], then any populated
    /// variant. Returns an empty string only when nothing is populated.
    pub fn get(&self, locale: Locale) -> &str {
        let chain: [Strategy<LocaleQuery<'_>, &str>; 3] =
            [requested_locale as _, default_locale as _, any_locale as _];
        first_resolved(&chain, LocaleQuery { text: self, locale }).unwrap_or("")
    }
}

/// Strategy: the requested locale.
pub fn requested_locale<'a>(query: LocaleQuery<'a>) -> Option<&'a str> {
    query.text.variant(query.locale)
}

/// Strategy: the default locale.
pub fn default_locale<'a>(query: LocaleQuery<'a>) -> Option<&'a str> {
    query.text.variant(Locale::DEFAULT)
}

/// Strategy: whichever locale is populated first.
pub fn any_locale<'a>(query: LocaleQuery<'a>) -> Option<&'a str> {
    [Locale::En, Locale::Zh]
        .into_iter()
        .find_map(|locale| query.text.variant(locale))
}

/// Atomic command category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Config,
    Init,
    Branch,
    Commit,
    Remote,
    Diff,
    Undo,
    Stash,
    Tag,
    Advanced,
}

impl CommandCategory {
    /// Get the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandCategory::Config => "config",
            CommandCategory::Init => "init",
            CommandCategory::Branch => "branch",
            CommandCategory::Commit => "commit",
            CommandCategory::Remote => "remote",
            CommandCategory::Diff => "diff",
            CommandCategory::Undo => "undo",
            CommandCategory::Stash => "stash",
            CommandCategory::Tag => "tag",
            CommandCategory::Advanced => "advanced",
        }
    }

    /// Get all categories.
    pub fn all() -> &'static [CommandCategory] {
        &[
            CommandCategory::Config,
            CommandCategory::Init,
            CommandCategory::Branch,
            CommandCategory::Commit,
            CommandCategory::Remote,
            CommandCategory::Diff,
            CommandCategory::Undo,
            CommandCategory::Stash,
            CommandCategory::Tag,
            CommandCategory::Advanced,
        ]
    }
}

impl std::str::FromStr for CommandCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "config" | "configuration" => Ok(CommandCategory::Config),
            "init" | "initialization" => Ok(CommandCategory::Init),
            "branch" => Ok(CommandCategory::Branch),
            "commit" => Ok(CommandCategory::Commit),
            "remote" => Ok(CommandCategory::Remote),
            "diff" => Ok(CommandCategory::Diff),
            "undo" => Ok(CommandCategory::Undo),
            "stash" => Ok(CommandCategory::Stash),
            "tag" => Ok(CommandCategory::Tag),
            "advanced" => Ok(CommandCategory::Advanced),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scenario (workflow) category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCategory {
    Setup,
    Start,
    Daily,
    Collaboration,
    Fix,
    Release,
    Maintenance,
}

impl ScenarioCategory {
    /// Get the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioCategory::Setup => "setup",
            ScenarioCategory::Start => "start",
            ScenarioCategory::Daily => "daily",
            ScenarioCategory::Collaboration => "collaboration",
            ScenarioCategory::Fix => "fix",
            ScenarioCategory::Release => "release",
            ScenarioCategory::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for ScenarioCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "setup" => Ok(ScenarioCategory::Setup),
            "start" => Ok(ScenarioCategory::Start),
            "daily" => Ok(ScenarioCategory::Daily),
            "collaboration" => Ok(ScenarioCategory::Collaboration),
            "fix" => Ok(ScenarioCategory::Fix),
            "release" => Ok(ScenarioCategory::Release),
            "maintenance" => Ok(ScenarioCategory::Maintenance),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scenario difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Get the string representation of the difficulty.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

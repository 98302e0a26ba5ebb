// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Fuzzy search over the command and scenario catalogs.
//!
//! Two weighted indexes are built once per catalog and locale. The
//! registries' plain substring search stays available for filtering.

pub mod bitap;
mod highlight;
mod index;

pub use highlight::{highlight_matches, highlight_with, highlight_with_markers, MARK_CLOSE, MARK_OPEN};
pub use index::{field_norm, FieldMatch, FieldReader, SearchHit, SearchIndex, SearchOptions, WeightedKey};

use serde::Serialize;

use crate::catalog::{AtomicCommand, Catalog, Locale, Scenario};
use crate::config::{CommandWeights, ScenarioWeights, SearchConfig};

/// Shortest query that yields tag suggestions.
const MIN_SUGGESTION_QUERY: usize = 2;

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            min_match_char_length: config.min_match_char_length,
        }
    }
}

/// Weighted keys of the command index.
pub fn command_keys(weights: &CommandWeights) -> Vec<WeightedKey<AtomicCommand>> {
    vec![
        WeightedKey::scalar("command", weights.command, |c, _| vec![c.full_command.clone()]),
        WeightedKey::scalar("description", weights.description, |c, locale| {
            vec![c.description(locale).to_string()]
        }),
        WeightedKey::list("tags", weights.tags, |c, _| c.tags.clone()),
        WeightedKey::scalar("category", weights.category, |c, _| {
            vec![c.category.as_str().to_string()]
        }),
    ]
}

/// Weighted keys of the scenario index.
pub fn scenario_keys(weights: &ScenarioWeights) -> Vec<WeightedKey<Scenario>> {
    vec![
        WeightedKey::scalar("title", weights.title, |s, locale| vec![s.title(locale).to_string()]),
        WeightedKey::scalar("description", weights.description, |s, locale| {
            vec![s.description(locale).to_string()]
        }),
        WeightedKey::list("tags", weights.tags, |s, _| s.tags.clone()),
        WeightedKey::list("steps.command", weights.steps, |s, _| {
            s.steps.iter().map(|step| step.command.clone()).collect()
        }),
    ]
}

/// Results of a combined query, each kind capped independently.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedResults<'a> {
    pub commands: Vec<SearchHit<'a, AtomicCommand>>,
    pub scenarios: Vec<SearchHit<'a, Scenario>>,
}

impl CombinedResults<'_> {
    /// Total hits across both kinds.
    pub fn len(&self) -> usize {
        self.commands.len() + self.scenarios.len()
    }

    /// Whether neither kind has hits.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.scenarios.is_empty()
    }
}

/// Both catalog indexes.
pub struct CatalogSearch<'a> {
    commands: SearchIndex<'a, AtomicCommand>,
    scenarios: SearchIndex<'a, Scenario>,
}

impl<'a> CatalogSearch<'a> {
    /// Index a catalog for one locale.
    pub fn new(catalog: &'a Catalog, config: &SearchConfig, locale: Locale) -> Self {
        let options = SearchOptions::from(config);
        Self {
            commands: SearchIndex::new(
                catalog.commands().all(),
                &command_keys(&config.command_weights),
                options,
                locale,
            ),
            scenarios: SearchIndex::new(
                catalog.scenarios().all(),
                &scenario_keys(&config.scenario_weights),
                options,
                locale,
            ),
        }
    }

    /// Ranked command hits.
    pub fn search_commands(&self, query: &str) -> Vec<SearchHit<'a, AtomicCommand>> {
        self.commands.search(query)
    }

    /// Ranked scenario hits.
    pub fn search_scenarios(&self, query: &str) -> Vec<SearchHit<'a, Scenario>> {
        self.scenarios.search(query)
    }

    /// Query both indexes, keeping at most `max_per_kind` hits of each.
    pub fn combined_search(&self, query: &str, max_per_kind: usize) -> CombinedResults<'a> {
        let mut commands = self.search_commands(query);
        let mut scenarios = self.search_scenarios(query);
        commands.truncate(max_per_kind);
        scenarios.truncate(max_per_kind);

        tracing::debug!(
            "Query {:?}: {} commands, {} scenarios",
            query,
            commands.len(),
            scenarios.len()
        );

        CombinedResults {
            commands,
            scenarios,
        }
    }

    /// Tags of the top hits that contain the query, de-duplicated.
    pub fn search_suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        if query.trim().is_empty() || query.chars().count() < MIN_SUGGESTION_QUERY || limit == 0 {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let results = self.combined_search(query, limit);
        let tags = results
            .commands
            .iter()
            .flat_map(|hit| hit.item.tags.iter())
            .chain(results.scenarios.iter().flat_map(|hit| hit.item.tags.iter()));

        let mut suggestions: Vec<String> = Vec::new();
        for tag in tags {
            if tag.to_lowercase().contains(&needle) && !suggestions.contains(tag) {
                suggestions.push(tag.clone());
                if suggestions.len() == limit {
                    break;
                }
            }
        }
        suggestions
    }
}

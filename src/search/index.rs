// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Weighted multi-field fuzzy index.

use serde::Serialize;

use super::bitap::{normalize, BitapOptions, BitapSearch};
use crate::catalog::Locale;

/// Reads the text values of one field. List fields return one value per
/// element; scalar fields return at most one.
pub type FieldReader<T> = fn(&T, Locale) -> Vec<String>;

/// A searchable field and its relative weight.
pub struct WeightedKey<T> {
    pub name: &'static str,
    pub weight: f64,
    /// Whether the field holds a list; list matches carry the element index.
    pub list: bool,
    pub read: FieldReader<T>,
}

impl<T> WeightedKey<T> {
    /// A scalar field.
    pub fn scalar(name: &'static str, weight: f64, read: FieldReader<T>) -> Self {
        Self {
            name,
            weight,
            list: false,
            read,
        }
    }

    /// A list field.
    pub fn list(name: &'static str, weight: f64, read: FieldReader<T>) -> Self {
        Self {
            name,
            weight,
            list: true,
            read,
        }
    }
}

/// Index-wide options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub threshold: f64,
    pub min_match_char_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_char_length: 2,
        }
    }
}

impl From<SearchOptions> for BitapOptions {
    fn from(options: SearchOptions) -> Self {
        BitapOptions {
            threshold: options.threshold,
            min_match_char_length: options.min_match_char_length,
        }
    }
}

/// One matched field value of a hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub key: &'static str,
    pub value: String,
    /// Element index for list fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_index: Option<usize>,
    /// Inclusive character spans of the matched runs in `value`.
    pub spans: Vec<(usize, usize)>,
}

/// A ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    /// Position of the item in the indexed slice.
    pub index: usize,
    /// Lower is better; 0.0 is a perfect match.
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

#[derive(Debug, Clone)]
struct IndexedValue {
    key: usize,
    ref_index: Option<usize>,
    value: String,
    normalized: Vec<char>,
    norm: f64,
}

#[derive(Debug, Clone)]
struct IndexedKey {
    name: &'static str,
    weight: f64,
}

/// Fuzzy index over a slice of items.
#[derive(Debug, Clone)]
pub struct SearchIndex<'a, T> {
    items: &'a [T],
    keys: Vec<IndexedKey>,
    records: Vec<Vec<IndexedValue>>,
    options: SearchOptions,
}

/// `1 / sqrt(token count)` rounded to three decimals, tokens being runs of
/// non-space characters.
pub fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

impl<'a, T> SearchIndex<'a, T> {
    /// Build an index. Weights are normalized to sum to one; keys with a
    /// non-positive weight are not indexed. Blank values are skipped.
    pub fn new(
        items: &'a [T],
        keys: &[WeightedKey<T>],
        options: SearchOptions,
        locale: Locale,
    ) -> Self {
        let active: Vec<&WeightedKey<T>> = keys.iter().filter(|k| k.weight > 0.0).collect();
        let total: f64 = active.iter().map(|k| k.weight).sum();

        let indexed_keys = active
            .iter()
            .map(|k| IndexedKey {
                name: k.name,
                weight: k.weight / total,
            })
            .collect();

        let records = items
            .iter()
            .map(|item| {
                let mut values = Vec::new();
                for (key_index, key) in active.iter().enumerate() {
                    for (position, value) in (key.read)(item, locale).into_iter().enumerate() {
                        if value.trim().is_empty() {
                            continue;
                        }
                        values.push(IndexedValue {
                            key: key_index,
                            ref_index: key.list.then_some(position),
                            normalized: normalize(&value),
                            norm: field_norm(&value),
                            value,
                        });
                    }
                }
                values
            })
            .collect();

        tracing::debug!("Indexed {} items over {} keys", items.len(), active.len());

        Self {
            items,
            keys: indexed_keys,
            records,
            options,
        }
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ranked fuzzy search. A blank query returns nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a, T>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = BitapSearch::new(query, self.options.into());
        let mut hits = Vec::new();

        for (index, values) in self.records.iter().enumerate() {
            let mut score = 1.0;
            let mut matches = Vec::new();

            for value in values {
                let result = matcher.search_in_normalized(&value.normalized);
                if !result.is_match {
                    continue;
                }

                let field_score = if result.score == 0.0 {
                    f64::EPSILON
                } else {
                    result.score
                };
                let weight = self.keys[value.key].weight;
                score *= field_score.powf(weight * value.norm);

                matches.push(FieldMatch {
                    key: self.keys[value.key].name,
                    value: value.value.clone(),
                    ref_index: value.ref_index,
                    spans: result.indices,
                });
            }

            if !matches.is_empty() {
                hits.push(SearchHit {
                    item: &self.items[index],
                    index,
                    score,
                    matches,
                });
            }
        }

        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        name: &'static str,
        about: &'static str,
        labels: Vec<&'static str>,
    }

    fn keys(name_weight: f64, about_weight: f64) -> Vec<WeightedKey<Entry>> {
        vec![
            WeightedKey::scalar("name", name_weight, |e, _| vec![e.name.to_string()]),
            WeightedKey::scalar("about", about_weight, |e, _| vec![e.about.to_string()]),
            WeightedKey::list("labels", 0.2, |e, _| {
                e.labels.iter().map(|l| l.to_string()).collect()
            }),
        ]
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                name: "git status",
                about: "Show the working tree",
                labels: vec!["inspect"],
            },
            Entry {
                name: "git push",
                about: "Upload commits to the remote",
                labels: vec!["remote", "upload"],
            },
            Entry {
                name: "git stash",
                about: "Shelve local changes",
                labels: vec!["stash", "save"],
            },
        ]
    }

    #[test]
    fn test_field_norm() {
        assert_eq!(field_norm("push"), 1.0);
        assert_eq!(field_norm("git push"), 0.707);
        assert_eq!(field_norm("git  push  origin"), 0.577);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let items = entries();
        let index = SearchIndex::new(&items, &keys(0.4, 0.3), SearchOptions::default(), Locale::En);
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        let items = entries();
        let index = SearchIndex::new(&items, &keys(0.4, 0.3), SearchOptions::default(), Locale::En);
        assert!(index.search("zzzzqqq").is_empty());
    }

    #[test]
    fn test_exact_value_ranks_first() {
        let items = entries();
        let index = SearchIndex::new(&items, &keys(0.4, 0.3), SearchOptions::default(), Locale::En);
        let hits = index.search("git push");
        assert_eq!(hits[0].item.name, "git push");
        assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_list_matches_carry_ref_index() {
        let items = entries();
        let index = SearchIndex::new(&items, &keys(0.4, 0.3), SearchOptions::default(), Locale::En);
        let hits = index.search("upload");
        let push = hits.iter().find(|h| h.item.name == "git push").unwrap();
        let label = push.matches.iter().find(|m| m.key == "labels").unwrap();
        assert_eq!(label.ref_index, Some(1));
        assert_eq!(label.value, "upload");
        assert_eq!(label.spans, vec![(0, 5)]);
    }

    #[test]
    fn test_weights_change_ranking() {
        let items = vec![
            Entry {
                name: "rebase",
                about: "other",
                labels: vec![],
            },
            Entry {
                name: "other",
                about: "rebase",
                labels: vec![],
            },
        ];
        let name_heavy = SearchIndex::new(&items, &keys(0.9, 0.1), SearchOptions::default(), Locale::En);
        assert_eq!(name_heavy.search("rebase")[0].index, 0);

        let about_heavy = SearchIndex::new(&items, &keys(0.1, 0.9), SearchOptions::default(), Locale::En);
        assert_eq!(about_heavy.search("rebase")[0].index, 1);
    }

    #[test]
    fn test_ties_keep_item_order() {
        let items = vec![
            Entry {
                name: "same",
                about: "",
                labels: vec![],
            },
            Entry {
                name: "same",
                about: "",
                labels: vec![],
            },
        ];
        let index = SearchIndex::new(&items, &keys(0.4, 0.3), SearchOptions::default(), Locale::En);
        let order: Vec<_> = index.search("same").iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_zero_weight_key_is_not_indexed() {
        let items = entries();
        let index = SearchIndex::new(&items, &keys(0.4, 0.0), SearchOptions::default(), Locale::En);
        assert!(index.search("shelve").is_empty());
    }
}

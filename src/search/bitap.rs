// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Bitap approximate string matching.
//!
//! Scores are error ratios: `errors / pattern length`, so 0.0 is an exact
//! match. Matching is case-insensitive and location-independent. Patterns
//! longer than [`MAX_BITS`] characters are searched in chunks.

use std::collections::HashMap;

/// Longest pattern chunk handled by one bit mask.
pub const MAX_BITS: usize = 32;

/// Lowest score reported for a non-identical match.
const MIN_SCORE: f64 = 0.001;

/// Matching options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapOptions {
    /// Highest accepted error ratio.
    pub threshold: f64,
    /// Matched runs shorter than this are dropped; a text whose runs are
    /// all dropped does not match.
    pub min_match_char_length: usize,
}

impl Default for BitapOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_char_length: 2,
        }
    }
}

/// Outcome of matching one text.
#[derive(Debug, Clone, PartialEq)]
pub struct BitapMatch {
    pub is_match: bool,
    pub score: f64,
    /// Inclusive character ranges of matched runs.
    pub indices: Vec<(usize, usize)>,
}

impl BitapMatch {
    fn no_match() -> Self {
        Self {
            is_match: false,
            score: 1.0,
            indices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct BitapSearch {
    pattern: Vec<char>,
    chunks: Vec<Chunk>,
    options: BitapOptions,
}

/// Lowercase character by character, keeping one output char per input char
/// so indices stay valid against the original text.
pub fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn pattern_alphabet(pattern: &[char]) -> HashMap<char, u64> {
    let len = pattern.len();
    let mut mask = HashMap::new();
    for (i, c) in pattern.iter().enumerate() {
        *mask.entry(*c).or_insert(0) |= 1u64 << (len - i - 1);
    }
    mask
}

impl BitapSearch {
    /// Compile a pattern.
    pub fn new(pattern: &str, options: BitapOptions) -> Self {
        let pattern = normalize(pattern);
        let len = pattern.len();
        let mut chunks = Vec::new();

        let mut add_chunk = |slice: &[char], start_index: usize| {
            chunks.push(Chunk {
                pattern: slice.to_vec(),
                alphabet: pattern_alphabet(slice),
                start_index,
            });
        };

        if len <= MAX_BITS {
            add_chunk(&pattern, 0);
        } else {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                add_chunk(&pattern[i..i + MAX_BITS], i);
                i += MAX_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                add_chunk(&pattern[start..], start);
            }
        }

        Self {
            pattern,
            chunks,
            options,
        }
    }

    /// Whether the compiled pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Match a text against the pattern.
    pub fn search_in(&self, text: &str) -> BitapMatch {
        let text = normalize(text);
        self.search_in_normalized(&text)
    }

    /// Match an already normalized text.
    pub fn search_in_normalized(&self, text: &[char]) -> BitapMatch {
        if self.pattern.is_empty() || text.is_empty() {
            return BitapMatch::no_match();
        }

        if self.pattern.as_slice() == text {
            return BitapMatch {
                is_match: true,
                score: 0.0,
                indices: vec![(0, text.len() - 1)],
            };
        }

        let mut all_indices = Vec::new();
        let mut total_score = 0.0;
        let mut has_matches = false;

        for chunk in &self.chunks {
            let result = search_chunk(text, chunk, &self.options);
            if result.is_match {
                has_matches = true;
                all_indices.extend(result.indices);
            }
            total_score += result.score;
        }

        BitapMatch {
            is_match: has_matches,
            score: if has_matches {
                total_score / self.chunks.len() as f64
            } else {
                1.0
            },
            indices: all_indices,
        }
    }
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&i| &text[i..i + pattern.len()] == pattern)
}

fn search_chunk(text: &[char], chunk: &Chunk, options: &BitapOptions) -> BitapMatch {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let expected_location = chunk.start_index.min(text_len);
    let score_for = |errors: usize| errors as f64 / pattern_len as f64;

    let mut current_threshold = options.threshold;
    let mut match_mask = vec![false; text_len];

    // Exact occurrences tighten the threshold to zero errors.
    let mut best_location = expected_location;
    while let Some(index) = find_from(text, pattern, best_location) {
        current_threshold = current_threshold.min(0.0);
        best_location = index + pattern_len;
        for flag in &mut match_mask[index..index + pattern_len] {
            *flag = true;
        }
    }

    let mut best: Option<usize> = None;
    let mut final_score = 1.0;
    let mut last_bits: Vec<u64> = Vec::new();
    let finish = text_len + pattern_len;
    let mask = 1u64 << (pattern_len - 1);

    for errors in 0..pattern_len {
        let mut start = 1usize;
        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let location = j - 1;
            let char_match = text
                .get(location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);

            if location < text_len {
                match_mask[location] = char_match != 0;
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                let prev = last_bits.get(j).copied().unwrap_or(0);
                bits[j] |= ((prev_next | prev) << 1) | 1 | prev_next;
            }

            if bits[j] & mask != 0 {
                final_score = score_for(errors);
                if final_score <= current_threshold {
                    current_threshold = final_score;
                    best = Some(location);
                    if location <= expected_location {
                        break;
                    }
                    start = 1.max((2 * expected_location).saturating_sub(location));
                }
            }

            j -= 1;
        }

        if score_for(errors + 1) > current_threshold {
            break;
        }
        last_bits = bits;
    }

    if best.is_none() {
        return BitapMatch::no_match();
    }

    let indices = mask_to_indices(&match_mask, options.min_match_char_length);
    if indices.is_empty() {
        return BitapMatch::no_match();
    }

    BitapMatch {
        is_match: true,
        score: final_score.max(MIN_SCORE),
        indices,
    }
}

/// Collapse a per-character mask into inclusive runs of at least `min_len`.
pub fn mask_to_indices(mask: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut indices = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    indices.push((s, i - 1));
                }
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        if mask.len() - s >= min_len {
            indices.push((s, mask.len() - 1));
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(pattern: &str, text: &str) -> BitapMatch {
        BitapSearch::new(pattern, BitapOptions::default()).search_in(text)
    }

    #[test]
    fn test_identical_text_scores_zero() {
        let result = search("git push", "git push");
        assert!(result.is_match);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.indices, vec![(0, 7)]);
    }

    #[test]
    fn test_exact_substring() {
        let result = search("stash", "git stash pop");
        assert!(result.is_match);
        assert_eq!(result.score, MIN_SCORE);
        assert!(result.indices.contains(&(4, 8)));
    }

    #[test]
    fn test_case_insensitive() {
        let result = search("REBASE", "git rebase -i");
        assert!(result.is_match);
        assert_eq!(result.score, MIN_SCORE);
    }

    #[test]
    fn test_typo_within_threshold() {
        let result = search("comit", "git commit -m");
        assert!(result.is_match);
        assert!(result.score > MIN_SCORE && result.score <= 0.4);
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        assert!(!search("cherry", "git status").is_match);
    }

    #[test]
    fn test_threshold_zero_requires_exact() {
        let options = BitapOptions {
            threshold: 0.0,
            min_match_char_length: 1,
        };
        let search = BitapSearch::new("comit", options);
        assert!(!search.search_in("git commit").is_match);
        assert!(search.search_in("comit").is_match);
    }

    #[test]
    fn test_min_match_char_length_drops_short_runs() {
        let options = BitapOptions {
            threshold: 0.4,
            min_match_char_length: 3,
        };
        assert!(!BitapSearch::new("ab", options).search_in("xx ab xx").is_match);
        assert!(BitapSearch::new("ab", BitapOptions::default())
            .search_in("xx ab xx")
            .is_match);
    }

    #[test]
    fn test_location_independent() {
        let near = search("tag", "tag list");
        let far = search("tag", "list every annotated release tag");
        assert_eq!(near.score, far.score);
    }

    #[test]
    fn test_long_pattern_is_chunked() {
        let pattern = "push the current branch and set upstream tracking";
        let search = BitapSearch::new(pattern, BitapOptions::default());
        assert_eq!(search.chunks.len(), 2);
        let result = search.search_in("push the current branch and set upstream tracking ref");
        assert!(result.is_match);
    }

    #[test]
    fn test_indices_are_char_offsets() {
        let result = search("推送", "推送当前分支");
        assert!(result.is_match);
        assert_eq!(result.indices[0], (0, 1));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(!search("", "git").is_match);
        assert!(!search("git", "").is_match);
    }

    #[test]
    fn test_mask_to_indices() {
        let mask = [true, true, false, true, false, true, true, true];
        assert_eq!(mask_to_indices(&mask, 2), vec![(0, 1), (5, 7)]);
        assert_eq!(mask_to_indices(&mask, 1), vec![(0, 1), (3, 3), (5, 7)]);
        assert!(mask_to_indices(&[], 1).is_empty());
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ordered resolution strategies.
//!
//! Locale lookup and scenario step resolution both follow the same shape:
//! a fixed list of strategies tried in priority order, where the first one
//! that yields a value wins.

/// A single resolution strategy over a context `C`.
///
/// Contexts are small `Copy` views passed by value, so strategies that
/// borrow from the context can return data tied to its lifetime.
pub type Strategy<C, T> = fn(C) -> Option<T>;

/// Evaluate strategies in order and return the first resolved value.
pub fn first_resolved<C: Copy, T>(strategies: &[Strategy<C, T>], context: C) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none(_: u32) -> Option<String> {
        None
    }

    fn even(n: u32) -> Option<String> {
        (n % 2 == 0).then(|| format!("even {}", n))
    }

    fn always(n: u32) -> Option<String> {
        Some(format!("any {}", n))
    }

    #[test]
    fn test_first_resolved_priority() {
        let chain: [Strategy<u32, String>; 3] = [none, even, always];
        assert_eq!(first_resolved(&chain, 4), Some("even 4".to_string()));
        assert_eq!(first_resolved(&chain, 5), Some("any 5".to_string()));
    }

    #[test]
    fn test_first_resolved_exhausted() {
        let chain: [Strategy<u32, String>; 1] = [none];
        assert_eq!(first_resolved(&chain, 1), None);
        assert_eq!(first_resolved::<u32, String>(&[], 1), None);
    }

    fn first_word(line: &str) -> Option<&str> {
        line.split_whitespace().next()
    }

    fn whole_line(line: &str) -> Option<&str> {
        Some(line)
    }

    #[test]
    fn test_first_resolved_borrows_from_context() {
        let owned = String::from("git status --short");
        let chain: [Strategy<&str, &str>; 2] = [first_word as _, whole_line as _];
        let word = first_resolved(&chain, owned.as_str());
        assert_eq!(word, Some("git"));
        assert_eq!(first_resolved(&chain, ""), Some(""));
    }
}

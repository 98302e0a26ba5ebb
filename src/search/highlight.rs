// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Match highlighting.

/// Default opening marker.
pub const MARK_OPEN: &str = "<mark>";

/// Default closing marker.
pub const MARK_CLOSE: &str = "</mark>";

/// Wrap each span of `text` in the default `<mark>` markers.
pub fn highlight_matches(text: &str, spans: &[(usize, usize)]) -> String {
    highlight_with_markers(text, spans, MARK_OPEN, MARK_CLOSE)
}

/// Wrap each span of `text` in the given markers.
pub fn highlight_with_markers(
    text: &str,
    spans: &[(usize, usize)],
    open: &str,
    close: &str,
) -> String {
    highlight_with(text, spans, |matched| format!("{}{}{}", open, matched, close))
}

/// Rewrite each span of `text` with `wrap`.
///
/// Spans are inclusive character ranges. Spans running past the end of the
/// text or with `start > end` are ignored; overlapping spans are merged.
/// Spans are applied from the highest start offset down.
pub fn highlight_with<F>(text: &str, spans: &[(usize, usize)], wrap: F) -> String
where
    F: Fn(&str) -> String,
{
    let chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<(usize, usize)> = spans
        .iter()
        .copied()
        .filter(|&(start, end)| start <= end && end < chars.len())
        .collect();
    ordered.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ordered.len());
    for (start, end) in ordered {
        match merged.last_mut() {
            Some(last) if end >= last.0 => {
                last.1 = last.1.max(end);
                last.0 = start;
            }
            _ => merged.push((start, end)),
        }
    }

    let mut out = String::new();
    let mut cursor = chars.len();
    for (start, end) in merged {
        let after: String = chars[end + 1..cursor].iter().collect();
        let inner: String = chars[start..=end].iter().collect();
        out = format!("{}{}{}", wrap(&inner), after, out);
        cursor = start;
    }

    let head: String = chars[..cursor].iter().collect();
    head + &out
}

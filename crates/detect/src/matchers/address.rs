//! Address matcher.
//!
//! Anchored on 6-digit postal codes: every PIN gets a symmetric character
//! window inspected for address vocabulary. Matches from neighbouring
//! PINs inside one physical address block overlap heavily; the engine
//! collapses them after geometry reconciliation.

use super::{has_adjacent_digit, Candidate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const CONFIDENCE: f32 = 0.75;

static PIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{6}\b").expect("valid pin pattern"));

/// Widens a byte range by `window` characters on each side, staying on
/// char boundaries.
fn window_bounds(text: &str, start: usize, end: usize, window: usize) -> (usize, usize) {
    let before: usize = text[..start]
        .chars()
        .rev()
        .take(window)
        .map(|c| c.len_utf8())
        .sum();
    let after: usize = text[end..].chars().take(window).map(|c| c.len_utf8()).sum();
    (start - before, end + after)
}

pub fn find(text: &str, keywords: &[String], window: usize) -> Vec<Candidate> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut out = Vec::new();

    for m in PIN.find_iter(text) {
        if has_adjacent_digit(text, &m.range()) {
            continue;
        }
        let (ws, we) = window_bounds(text, m.start(), m.end(), window);
        let lowered = text[ws..we].to_lowercase();
        if keywords.iter().any(|k| lowered.contains(k.as_str())) {
            out.push(Candidate {
                range: ws..we,
                value: text[ws..we].trim().to_string(),
                confidence: CONFIDENCE,
            });
        }
    }
    out
}

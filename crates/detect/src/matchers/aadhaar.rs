//! Aadhaar number matcher.
//!
//! 12 digits (16 for the long form), optionally grouped in blocks of four
//! with spaces or hyphens. Each separator convention gets its own pattern;
//! the optional-separator variant catches mixed grouping produced by OCR.

use super::{has_adjacent_digit, Candidate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const CONFIDENCE: f32 = 0.90;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{4} \d{4} \d{4}(?: \d{4})?\b",
        r"\b\d{4}-\d{4}-\d{4}(?:-\d{4})?\b",
        r"\b\d{12}(?:\d{4})?\b",
        r"\b\d{4}[ -]?\d{4}[ -]?\d{4}(?:[ -]?\d{4})?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid aadhaar pattern"))
    .collect()
});

pub fn find(text: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    for pattern in PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let range = m.range();
            if has_adjacent_digit(text, &range) {
                continue;
            }
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() == 12 || digits.len() == 16 {
                out.push(Candidate {
                    range,
                    value: digits,
                    confidence: CONFIDENCE,
                });
            }
        }
    }
    out
}

//! Mobile number matcher.
//!
//! 10-digit local numbers, optionally prefixed by a 2-digit country code
//! (bare, `+`-prefixed or parenthesized), grouped 5-5 or 3-3-4 or not at
//! all. Candidates are normalized to the bare 10 digits and must start
//! with a valid mobile leading digit.

use super::{has_adjacent_digit, Candidate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const CONFIDENCE: f32 = 0.85;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\(\+?\d{2}\)[\s-]?\d{5}[\s-]?\d{5}",
        r"(?:\+?\d{2}[\s-]?)?\d{5}[\s-]\d{5}",
        r"(?:\+?\d{2}[\s-]?)?\d{3}[\s-]\d{3}[\s-]\d{4}",
        r"(?:\+?\d{2}[\s-]?)?\d{10}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone pattern"))
    .collect()
});

/// Strips the country code and validates the leading digit. `None` means
/// the digits do not form a valid mobile number.
fn normalize(digits: &str) -> Option<String> {
    let local = if digits.len() == 12 && digits.starts_with("91") {
        &digits[2..]
    } else {
        digits
    };
    if local.len() == 10 && matches!(local.as_bytes()[0], b'6'..=b'9') {
        Some(local.to_string())
    } else {
        None
    }
}

pub fn find(text: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    for pattern in PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let range = m.range();
            if has_adjacent_digit(text, &range) {
                continue;
            }
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            if let Some(local) = normalize(&digits) {
                out.push(Candidate {
                    range,
                    value: local,
                    confidence: CONFIDENCE,
                });
            }
        }
    }
    out
}

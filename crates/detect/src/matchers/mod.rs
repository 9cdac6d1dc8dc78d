//! Category matchers over linearized page text.
//!
//! Each matcher is an independent pure function from text to candidates;
//! geometry reconciliation and deduplication happen in the engine.

pub mod aadhaar;
pub mod address;
pub mod pan;
pub mod phone;

use std::ops::Range;

/// A textual match before geometry reconciliation.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Byte range of the match in the linearized page text.
    pub range: Range<usize>,
    /// Normalized matched value.
    pub value: String,
    pub confidence: f32,
}

/// True when the match butts up against another digit, meaning it is a
/// slice of a longer number rather than a standalone value.
pub(crate) fn has_adjacent_digit(text: &str, range: &Range<usize>) -> bool {
    if range.start > 0 {
        if let Some(prev) = text[..range.start].chars().last() {
            if prev.is_ascii_digit() {
                return true;
            }
        }
    }
    if let Some(next) = text[range.end..].chars().next() {
        if next.is_ascii_digit() {
            return true;
        }
    }
    false
}

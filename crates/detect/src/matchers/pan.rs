//! PAN matcher: 5 letters, 4 digits, 1 letter.
//!
//! Three passes of decreasing confidence. Pass 1 trusts the raw text;
//! pass 2 repairs OCR letter/digit confusions in the four digit
//! positions; pass 3 slides a window across noisy words where a watermark
//! or smudge has fused the identifier to neighbouring characters. The
//! engine deduplicates across passes by normalized value, keeping the
//! highest-confidence occurrence.

use super::Candidate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const EXACT_CONFIDENCE: f32 = 0.90;
pub const FUZZY_CONFIDENCE: f32 = 0.75;
pub const AGGRESSIVE_CONFIDENCE: f32 = 0.65;

const PAN_LEN: usize = 10;
/// Digit positions within the 10-character identifier.
const DIGIT_RANGE: std::ops::Range<usize> = 5..9;

static EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]{5}[0-9]{4}[A-Za-z]\b").expect("valid pan pattern"));
static NORMALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid pan shape pattern"));
static ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9]{10}\b").expect("valid alnum run pattern"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid word pattern"));

/// Letter→digit substitutions OCR commonly makes in digit positions.
fn repair_digit(c: char) -> char {
    match c {
        'O' => '0',
        'I' => '1',
        'Z' => '2',
        'S' => '5',
        'B' => '8',
        'G' => '6',
        'T' => '7',
        other => other,
    }
}

/// Uppercases a 10-character window and repairs OCR confusions in the
/// digit positions only. The result still has to pass the shape check.
fn normalize_window(window: &[char]) -> String {
    window
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let upper = c.to_ascii_uppercase();
            if DIGIT_RANGE.contains(&i) {
                repair_digit(upper)
            } else {
                upper
            }
        })
        .collect()
}

pub fn find(text: &str, aggressive: bool) -> Vec<Candidate> {
    let mut out = Vec::new();

    // Pass 1: exact shape in the raw text.
    for m in EXACT.find_iter(text) {
        out.push(Candidate {
            range: m.range(),
            value: m.as_str().to_ascii_uppercase(),
            confidence: EXACT_CONFIDENCE,
        });
    }

    // Pass 2: 10-character alphanumeric runs, repaired then re-checked.
    for m in ALNUM_RUN.find_iter(text) {
        let chars: Vec<char> = m.as_str().chars().collect();
        let normalized = normalize_window(&chars);
        if NORMALIZED.is_match(&normalized) {
            out.push(Candidate {
                range: m.range(),
                value: normalized,
                confidence: FUZZY_CONFIDENCE,
            });
        }
    }

    // Pass 3: fused words of 10-12 alphanumerics, first valid window wins.
    if aggressive {
        for m in WORD.find_iter(text) {
            let stripped: Vec<char> = m
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if !(PAN_LEN..=12).contains(&stripped.len()) {
                continue;
            }
            for window in stripped.windows(PAN_LEN) {
                let normalized = normalize_window(window);
                if NORMALIZED.is_match(&normalized) {
                    out.push(Candidate {
                        range: m.range(),
                        value: normalized,
                        confidence: AGGRESSIVE_CONFIDENCE,
                    });
                    break;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(text: &str) -> Option<(String, f32)> {
        find(text, true)
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|c| (c.value, c.confidence))
    }

    #[test]
    fn exact_match_scores_high() {
        let (value, confidence) = best("pan: ABCDE1234F issued").unwrap();
        assert_eq!(value, "ABCDE1234F");
        assert_eq!(confidence, EXACT_CONFIDENCE);
    }

    #[test]
    fn lowercase_still_exact() {
        let (value, confidence) = best("abcde1234f").unwrap();
        assert_eq!(value, "ABCDE1234F");
        assert_eq!(confidence, EXACT_CONFIDENCE);
    }

    #[test]
    fn ocr_confusion_repaired_at_fuzzy_confidence() {
        // S in a digit position reads as 5.
        let (value, confidence) = best("ABCDE12S4F").unwrap();
        assert_eq!(value, "ABCDE1254F");
        assert_eq!(confidence, FUZZY_CONFIDENCE);
    }

    #[test]
    fn confusion_in_letter_position_is_not_repaired() {
        // A digit in a letter position can never satisfy the shape.
        assert!(find("4BCDE1234F", true).is_empty());
    }

    #[test]
    fn fused_word_found_by_aggressive_pass() {
        // Watermark noise fused to the identifier, no whitespace around it.
        let candidates = find("xxABCDE1234F", true);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "ABCDE1234F");
        assert_eq!(candidates[0].confidence, AGGRESSIVE_CONFIDENCE);
    }

    #[test]
    fn aggressive_pass_can_be_disabled() {
        assert!(find("xxABCDE1234F", false).is_empty());
        assert_eq!(find("xxABCDE1234F", true).len(), 1);
    }

    #[test]
    fn prose_is_clean() {
        assert!(find("no identifiers in this sentence at all", true).is_empty());
    }
}

//! Page text linearization and offset→geometry reconciliation.
//!
//! Tokens are joined into one string with single-space separators while a
//! span table records each token's byte range. The table is the bridge
//! between substring matches and token geometry; matching is page-local,
//! so a fresh table is built per page.

use kavach_core::{merge_boxes, BoundingBox, Page};
use std::ops::Range;

/// Byte range of one token inside the linearized page text, paired with
/// the token's geometry.
#[derive(Debug, Clone, Copy)]
struct TokenSpan {
    start: usize,
    end: usize,
    bbox: BoundingBox,
}

/// One page's concatenated token text plus the per-token offset table.
#[derive(Debug)]
pub struct LinearText {
    text: String,
    spans: Vec<TokenSpan>,
}

impl LinearText {
    pub fn from_page(page: &Page) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(page.tokens.len());

        for token in &page.tokens {
            if !text.is_empty() {
                text.push(' ');
            }
            let start = text.len();
            text.push_str(&token.text);
            spans.push(TokenSpan {
                start,
                end: text.len(),
                bbox: token.bbox,
            });
        }

        Self { text, spans }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maps a matched byte range back to the tightest box enclosing every
    /// token it overlaps. `None` when no token intersects the range; such
    /// a match cannot be redacted safely and the caller drops it.
    pub fn reconcile(&self, range: &Range<usize>) -> Option<BoundingBox> {
        let boxes: Vec<&BoundingBox> = self
            .spans
            .iter()
            .filter(|span| span.start < range.end && span.end > range.start)
            .map(|span| &span.bbox)
            .collect();
        merge_boxes(boxes)
    }
}

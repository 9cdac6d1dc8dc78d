//! Pipeline data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Axis-aligned bounding box in page pixel space.
///
/// Top-left origin, y grows downward. Width and height are non-negative;
/// a zero-area box is legal but is filtered out before painting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// One unit of recognized text with its confidence and geometry, as
/// produced by the extraction collaborator. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToken {
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// A single extracted page. Token order is the reading order produced by
/// extraction and defines the concatenation order used for matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-indexed page number.
    pub page_number: u32,
    pub width: f32,
    pub height: f32,
    pub tokens: Vec<TextToken>,
}

/// Category of a sensitive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionCategory {
    /// 12-digit (or 16-digit long form) Aadhaar number.
    Aadhaar,
    /// 10-character PAN: 5 letters, 4 digits, 1 letter.
    Pan,
    /// 10-digit mobile number, optionally with a country code.
    Phone,
    /// Postal-code-anchored address region.
    Address,
}

impl std::fmt::Display for DetectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionCategory::Aadhaar => write!(f, "aadhaar"),
            DetectionCategory::Pan => write!(f, "pan"),
            DetectionCategory::Phone => write!(f, "phone"),
            DetectionCategory::Address => write!(f, "address"),
        }
    }
}

/// A single sensitive match with reconciled geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub category: DetectionCategory,
    /// Normalized matched value (digits for numbers, window text for
    /// addresses).
    pub value: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    /// 1-indexed page the match was found on.
    pub page_number: u32,
}

/// All detections for one document, grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionSet {
    pub aadhaar: Vec<Detection>,
    pub pan: Vec<Detection>,
    pub phone: Vec<Detection>,
    pub address: Vec<Detection>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, detection: Detection) {
        match detection.category {
            DetectionCategory::Aadhaar => self.aadhaar.push(detection),
            DetectionCategory::Pan => self.pan.push(detection),
            DetectionCategory::Phone => self.phone.push(detection),
            DetectionCategory::Address => self.address.push(detection),
        }
    }

    pub fn total(&self) -> usize {
        self.aadhaar.len() + self.pan.len() + self.phone.len() + self.address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.aadhaar
            .iter()
            .chain(self.pan.iter())
            .chain(self.phone.iter())
            .chain(self.address.iter())
    }

    /// Detections grouped by page, for per-page painting.
    pub fn by_page(&self) -> BTreeMap<u32, Vec<&Detection>> {
        let mut pages: BTreeMap<u32, Vec<&Detection>> = BTreeMap::new();
        for det in self.iter() {
            pages.entry(det.page_number).or_default().push(det);
        }
        pages
    }

    /// Drops detections below the per-category confidence floors.
    pub fn retain_confident(&mut self, thresholds: &crate::config::ConfidenceThresholds) {
        fn apply(list: &mut Vec<Detection>, floor: Option<f32>) {
            if let Some(min) = floor {
                list.retain(|d| d.confidence >= min);
            }
        }
        apply(&mut self.aadhaar, thresholds.aadhaar);
        apply(&mut self.pan, thresholds.pan);
        apply(&mut self.phone, thresholds.phone);
        apply(&mut self.address, thresholds.address);
    }

    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            aadhaar: self.aadhaar.len(),
            pan: self.pan.len(),
            phone: self.phone.len(),
            address: self.address.len(),
        }
    }
}

/// Per-category counts for caller-facing display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub aadhaar: usize,
    pub pan: usize,
    pub phone: usize,
    pub address: usize,
}

/// The redacted output document.
///
/// Invariant: `mime_type` and overall dimensions equal the source's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

//! Caller-facing configuration.
//!
//! Heuristic constants (window size, overlap threshold) are policy, not
//! correctness requirements, so they live here rather than in the
//! matchers.

use serde::{Deserialize, Serialize};

/// Keywords whose presence near a postal code marks an address region.
const DEFAULT_ADDRESS_KEYWORDS: &[&str] = &[
    "street", "road", "lane", "avenue", "cross", "main", "nagar", "colony", "sector", "layout",
    "block", "house", "building", "apartment", "flat", "floor", "plot", "village", "post",
    "taluk", "tehsil", "city", "town", "district", "state", "pin", "pincode", "locality",
];

/// Detection engine options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    /// Characters inspected on each side of a postal code when deciding
    /// whether it sits inside an address.
    pub address_window: usize,
    /// Keywords that qualify a postal-code window as an address.
    pub address_keywords: Vec<String>,
    /// Fraction of either box's area that the overlap must exceed before
    /// two address detections are merged.
    pub address_overlap_threshold: f32,
    /// Enables the aggressive PAN pass that slides a window across noisy
    /// words. Lowest confidence tier; callers wanting only exact and
    /// fuzzy matches can switch it off.
    pub aggressive_pan: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            address_window: 200,
            address_keywords: DEFAULT_ADDRESS_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            address_overlap_threshold: 0.5,
            aggressive_pan: true,
        }
    }
}

/// Redaction engine options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// RGB fill for painted regions. Always applied fully opaque.
    pub fill: [u8; 3],
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self { fill: [0, 0, 0] }
    }
}

/// Optional per-category confidence floors applied before redaction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceThresholds {
    pub aadhaar: Option<f32>,
    pub pan: Option<f32>,
    pub phone: Option<f32>,
    pub address: Option<f32>,
}

impl ConfidenceThresholds {
    pub fn is_noop(&self) -> bool {
        self.aadhaar.is_none()
            && self.pan.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = DetectionConfig::default();
        assert_eq!(config.address_window, 200);
        assert_eq!(config.address_overlap_threshold, 0.5);
        assert!(config.aggressive_pan);
        assert!(config.address_keywords.iter().any(|k| k == "street"));
    }

    #[test]
    fn default_fill_is_black() {
        assert_eq!(RedactionConfig::default().fill, [0, 0, 0]);
    }
}

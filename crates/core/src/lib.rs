//! Shared data model for the detection and redaction pipeline.
//!
//! Extraction output (pages of positioned text tokens) flows into the
//! detector, which produces a [`DetectionSet`]; the redactor consumes the
//! set together with the original document bytes and emits a
//! [`RedactedArtifact`]. Every stage hands an immutable structure to the
//! next; nothing here is shared-mutable across components.

pub mod config;
pub mod geometry;
pub mod model;

pub use config::{ConfidenceThresholds, DetectionConfig, RedactionConfig};
pub use geometry::{flip_vertical, merge_boxes};
pub use model::{
    BoundingBox, Detection, DetectionCategory, DetectionSet, DetectionSummary, Page,
    RedactedArtifact, TextToken,
};

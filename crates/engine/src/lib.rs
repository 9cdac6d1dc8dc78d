//! Pipeline orchestration: extraction output in, redacted artifact out.
//!
//! The pipeline is a synchronous, stateless transformation per document:
//! detect sensitive content on the extracted pages, optionally drop
//! low-confidence tiers, then paint the redactions. Nothing is retained
//! between calls and no partial artifact is ever returned.

use kavach_core::{
    ConfidenceThresholds, DetectionConfig, DetectionSet, Page, RedactedArtifact, RedactionConfig,
};
use kavach_detect::Detector;
use kavach_redact::{RedactError, Redactor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kavach_core as core;
pub use kavach_redact::SourceFormat;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Redact(#[from] RedactError),
}

/// Everything configurable about one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    pub detection: DetectionConfig,
    /// Per-category confidence floors applied between detection and
    /// redaction; unset categories keep everything.
    pub thresholds: ConfidenceThresholds,
    pub redaction: RedactionConfig,
}

/// Output of a pipeline run: what was found, and the redacted document.
/// The detections are handed to the caller for summary display only;
/// they have already been consumed by the redactor.
#[derive(Debug)]
pub struct PipelineReport {
    pub detections: DetectionSet,
    pub artifact: RedactedArtifact,
}

/// One-document redaction pipeline. Construct once, run per document;
/// holds configuration only, so sharing it across threads is safe.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    detector: Detector,
    redactor: Redactor,
    thresholds: ConfidenceThresholds,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            detector: Detector::new(options.detection),
            redactor: Redactor::new(options.redaction),
            thresholds: options.thresholds,
        }
    }

    /// Runs detection and redaction for one document. `pages` is the
    /// extraction collaborator's output for `source`; `mime` names the
    /// source format and is preserved on the artifact.
    pub fn run(
        &self,
        pages: &[Page],
        source: &[u8],
        mime: &str,
    ) -> Result<PipelineReport, PipelineError> {
        let mut detections = self.detector.detect(pages);
        if !self.thresholds.is_noop() {
            let before = detections.total();
            detections.retain_confident(&self.thresholds);
            log::debug!(
                "confidence floor dropped {} of {} detections",
                before - detections.total(),
                before
            );
        }

        if let Ok(summary) = serde_json::to_string(&detections.summary()) {
            log::info!("detection summary: {summary}");
        }

        let artifact = self.redactor.redact(source, mime, &detections)?;
        Ok(PipelineReport {
            detections,
            artifact,
        })
    }
}

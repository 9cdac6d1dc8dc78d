//! Pattern detection engine.
//!
//! Runs the category matchers over each page's linearized token text,
//! reconciles matched ranges back to token geometry and deduplicates the
//! results. Detection never fails on well-formed input: matches that
//! cannot be mapped to geometry are dropped, and an empty page simply
//! contributes nothing.

mod linearize;
mod matchers;

pub use linearize::LinearText;
pub use matchers::Candidate;

use kavach_core::{Detection, DetectionCategory, DetectionConfig, DetectionSet, Page};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Stateless detector. Holds only configuration; `detect` is idempotent
/// and may be called from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectionConfig,
}

impl Detector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Finds sensitive content across all pages. Pages are independent;
    /// matching never crosses a page boundary.
    pub fn detect(&self, pages: &[Page]) -> DetectionSet {
        let mut set = DetectionSet::new();
        for page in pages {
            self.detect_page(page, &mut set);
        }
        log::debug!(
            "detection complete: {} hits across {} pages",
            set.total(),
            pages.len()
        );
        set
    }

    fn detect_page(&self, page: &Page, set: &mut DetectionSet) {
        let linear = LinearText::from_page(page);
        if linear.text().is_empty() {
            return;
        }

        for candidate in dedup_best(matchers::aadhaar::find(linear.text())) {
            self.reconcile_into(set, &linear, page, DetectionCategory::Aadhaar, candidate);
        }

        let pan = matchers::pan::find(linear.text(), self.config.aggressive_pan);
        for candidate in dedup_best(pan) {
            self.reconcile_into(set, &linear, page, DetectionCategory::Pan, candidate);
        }

        for candidate in dedup_best(matchers::phone::find(linear.text())) {
            self.reconcile_into(set, &linear, page, DetectionCategory::Phone, candidate);
        }

        let mut addresses = Vec::new();
        for candidate in matchers::address::find(
            linear.text(),
            &self.config.address_keywords,
            self.config.address_window,
        ) {
            if let Some(bbox) = linear.reconcile(&candidate.range) {
                addresses.push(Detection {
                    category: DetectionCategory::Address,
                    value: candidate.value,
                    confidence: candidate.confidence,
                    bbox,
                    page_number: page.page_number,
                });
            } else {
                log::debug!("page {}: address match without geometry dropped", page.page_number);
            }
        }
        for detection in merge_overlapping(addresses, self.config.address_overlap_threshold) {
            set.push(detection);
        }
    }

    fn reconcile_into(
        &self,
        set: &mut DetectionSet,
        linear: &LinearText,
        page: &Page,
        category: DetectionCategory,
        candidate: Candidate,
    ) {
        match linear.reconcile(&candidate.range) {
            Some(bbox) => set.push(Detection {
                category,
                value: candidate.value,
                confidence: candidate.confidence,
                bbox,
                page_number: page.page_number,
            }),
            // No intersecting token: the geometry is unavailable, so the
            // match cannot be redacted and is silently discarded.
            None => log::debug!(
                "page {}: {} match without geometry dropped",
                page.page_number,
                category
            ),
        }
    }
}

/// Collapses candidates sharing a normalized value, keeping the
/// highest-confidence occurrence. Output order follows first appearance,
/// so results do not depend on map iteration order.
fn dedup_best(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, Candidate> = HashMap::new();

    for candidate in candidates {
        match best.entry(candidate.value.clone()) {
            Entry::Occupied(mut slot) => {
                if candidate.confidence > slot.get().confidence {
                    slot.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                order.push(candidate.value.clone());
                slot.insert(candidate);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|value| best.remove(&value))
        .collect()
}

/// Collapses address boxes that mostly cover each other: when the
/// intersection exceeds the threshold share of the smaller box, the
/// smaller (less complete) one is discarded.
fn merge_overlapping(mut detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.bbox.area().total_cmp(&a.bbox.area()));
    let mut kept: Vec<Detection> = Vec::new();

    'candidates: for detection in detections {
        for existing in &kept {
            let overlap = detection.bbox.intersection_area(&existing.bbox);
            let smaller = detection.bbox.area().min(existing.bbox.area());
            if smaller > 0.0 && overlap > threshold * smaller {
                continue 'candidates;
            }
        }
        kept.push(detection);
    }
    kept
}

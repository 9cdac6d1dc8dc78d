//! Redaction error taxonomy.
//!
//! Every variant is fatal for the whole document: a partially redacted
//! artifact must never reach the caller, so page-level failures abort
//! instead of skipping.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedactError {
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode source document: {0}")]
    Decode(String),

    #[error("failed to redact page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("failed to encode redacted document: {0}")]
    Encode(String),
}

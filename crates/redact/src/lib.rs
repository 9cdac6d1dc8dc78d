//! Redaction engine.
//!
//! Takes the original document bytes and a [`DetectionSet`] and produces
//! a permanently redacted copy in the same format and dimensions. Two
//! paths: raster images (top-left origin, painted pixel by pixel) and
//! paginated PDF documents (bottom-left origin, painted into the content
//! stream). Redaction is all-or-nothing per document; a page that cannot
//! be painted fails the whole run rather than shipping unredacted.

mod error;
mod pdf;
mod raster;

pub use error::RedactError;

use image::ImageFormat;
use kavach_core::{DetectionSet, RedactedArtifact, RedactionConfig};

/// Supported source media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Pdf,
}

impl SourceFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(SourceFormat::Png),
            "image/jpeg" | "image/jpg" => Some(SourceFormat::Jpeg),
            "application/pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }
}

/// Stateless redactor holding only the fill configuration.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    config: RedactionConfig,
}

impl Redactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    /// Paints every detection onto the source document and re-serializes
    /// it. The artifact keeps the source MIME type and dimensions.
    pub fn redact(
        &self,
        bytes: &[u8],
        mime: &str,
        detections: &DetectionSet,
    ) -> Result<RedactedArtifact, RedactError> {
        let format = SourceFormat::from_mime(mime)
            .ok_or_else(|| RedactError::UnsupportedFormat(mime.to_string()))?;

        let redacted = match format {
            SourceFormat::Png => self.redact_raster(bytes, ImageFormat::Png, detections)?,
            SourceFormat::Jpeg => self.redact_raster(bytes, ImageFormat::Jpeg, detections)?,
            SourceFormat::Pdf => pdf::redact_pdf(bytes, &detections.by_page(), self.config.fill)?,
        };

        Ok(RedactedArtifact {
            bytes: redacted,
            mime_type: mime.to_string(),
        })
    }

    fn redact_raster(
        &self,
        bytes: &[u8],
        format: ImageFormat,
        detections: &DetectionSet,
    ) -> Result<Vec<u8>, RedactError> {
        let all: Vec<_> = detections.iter().collect();
        raster::redact_raster(bytes, format, &all, self.config.fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_dispatch() {
        assert_eq!(SourceFormat::from_mime("image/png"), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_mime("image/jpeg"), Some(SourceFormat::Jpeg));
        assert_eq!(
            SourceFormat::from_mime("application/pdf"),
            Some(SourceFormat::Pdf)
        );
        assert_eq!(SourceFormat::from_mime("text/plain"), None);
    }

    #[test]
    fn unsupported_mime_is_rejected_before_decoding() {
        let redactor = Redactor::default();
        let err = redactor.redact(b"anything", "text/plain", &DetectionSet::new());
        assert!(matches!(err, Err(RedactError::UnsupportedFormat(_))));
    }

    #[test]
    fn artifact_keeps_the_source_mime() {
        use image::{Rgba, RgbaImage};
        use std::io::Cursor;

        let img = RgbaImage::from_pixel(8, 8, Rgba([120, 130, 140, 255]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let artifact = Redactor::default()
            .redact(&png, "image/png", &DetectionSet::new())
            .unwrap();
        assert_eq!(artifact.mime_type, "image/png");
    }
}

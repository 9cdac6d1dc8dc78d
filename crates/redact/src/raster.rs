//! Raster redaction.
//!
//! Decodes the source image, paints fully opaque rectangles over every
//! detection and re-encodes to the source format at identical dimensions.
//! The fill replaces pixel values outright; nothing is blended, so no
//! edge pixel leaks original content.

use crate::error::RedactError;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use kavach_core::{BoundingBox, Detection};
use std::io::Cursor;

pub fn redact_raster(
    bytes: &[u8],
    format: ImageFormat,
    detections: &[&Detection],
    fill: [u8; 3],
) -> Result<Vec<u8>, RedactError> {
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| RedactError::Decode(e.to_string()))?;
    let mut canvas = decoded.to_rgba8();
    let color = Rgba([fill[0], fill[1], fill[2], 255]);

    let mut painted = 0usize;
    for detection in detections {
        // Raster documents are single-surface; extraction reports them as
        // page 1.
        if detection.page_number != 1 || detection.bbox.is_degenerate() {
            continue;
        }
        if let Some(rect) = clamp_rect(&detection.bbox, canvas.width(), canvas.height()) {
            draw_filled_rect_mut(&mut canvas, rect, color);
            painted += 1;
        }
    }
    log::debug!("raster redaction painted {painted} regions");

    encode(canvas, format)
}

/// Snaps a box to whole pixels and clips it to the canvas. `None` when
/// nothing of the box lies on the canvas.
fn clamp_rect(bbox: &BoundingBox, width: u32, height: u32) -> Option<Rect> {
    let x0 = bbox.x.floor().max(0.0) as u32;
    let y0 = bbox.y.floor().max(0.0) as u32;
    let x1 = (bbox.right().ceil().max(0.0) as u32).min(width);
    let y1 = (bbox.bottom().ceil().max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0))
}

fn encode(canvas: RgbaImage, format: ImageFormat) -> Result<Vec<u8>, RedactError> {
    let mut out = Vec::new();
    let mut cursor = Cursor::new(&mut out);
    let result = match format {
        // The JPEG encoder takes no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .write_to(&mut cursor, ImageFormat::Jpeg),
        _ => canvas.write_to(&mut cursor, format),
    };
    result.map_err(|e| RedactError::Encode(e.to_string()))?;
    Ok(out)
}

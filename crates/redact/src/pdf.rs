//! Paginated (PDF) redaction.
//!
//! Detection geometry arrives in extraction space (top-left origin,
//! y-down, page units); PDF drawing operators expect bottom-left origin,
//! y-up. Each box goes through the pure flip in `kavach_core::geometry`
//! with the page's MediaBox height, then an opaque filled rectangle is
//! appended to the page content stream inside its own `q`/`Q` block so it
//! occludes any text or image content underneath. Pages without
//! detections are not touched.

use crate::error::RedactError;
use kavach_core::{flip_vertical, BoundingBox, Detection};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream};
use std::collections::BTreeMap;

pub fn redact_pdf(
    bytes: &[u8],
    by_page: &BTreeMap<u32, Vec<&Detection>>,
    fill: [u8; 3],
) -> Result<Vec<u8>, RedactError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| RedactError::Decode(e.to_string()))?;
    let page_ids: Vec<lopdf::ObjectId> = doc.page_iter().collect();

    for (page_number, detections) in by_page {
        if *page_number == 0 || *page_number as usize > page_ids.len() {
            log::warn!("detection on missing page {page_number} skipped");
            continue;
        }
        let boxes: Vec<BoundingBox> = detections
            .iter()
            .map(|d| d.bbox)
            .filter(|b| !b.is_degenerate())
            .collect();
        if boxes.is_empty() {
            continue;
        }
        let page_id = page_ids[*page_number as usize - 1];
        paint_page(&mut doc, page_id, &boxes, fill).map_err(|reason| RedactError::Page {
            page: *page_number,
            reason,
        })?;
        log::debug!("page {page_number}: painted {} regions", boxes.len());
    }

    doc.compress();
    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RedactError::Encode(e.to_string()))?;
    Ok(out)
}

fn paint_page(
    doc: &mut Document,
    page_id: lopdf::ObjectId,
    boxes: &[BoundingBox],
    fill: [u8; 3],
) -> Result<(), String> {
    let page_height = page_height(doc, page_id);
    let content_data = page_content(doc, page_id)?;
    let overlaid = overlay_rects(&content_data, boxes, page_height, fill)?;

    let stream_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), overlaid));
    match doc.get_object_mut(page_id) {
        Ok(Object::Dictionary(dict)) => {
            dict.set(b"Contents", Object::Reference(stream_id));
            Ok(())
        }
        _ => Err("page object is not a dictionary".to_string()),
    }
}

/// Appends opaque filled rectangles to the content stream. The fill color
/// is set with `rg` inside a saved graphics state, so the rectangles
/// cover whatever was drawn before without inheriting transparency.
fn overlay_rects(
    content_data: &[u8],
    boxes: &[BoundingBox],
    page_height: f32,
    fill: [u8; 3],
) -> Result<Vec<u8>, String> {
    let content = Content::decode(content_data).map_err(|e| e.to_string())?;
    let mut operations = content.operations;

    operations.push(Operation::new("q", vec![]));
    let [r, g, b] = fill.map(|c| c as f32 / 255.0);
    operations.push(Operation::new(
        "rg",
        vec![Object::Real(r), Object::Real(g), Object::Real(b)],
    ));

    for bbox in boxes {
        let draw = flip_vertical(bbox, page_height);
        operations.push(Operation::new(
            "re",
            vec![
                Object::Real(draw.x),
                Object::Real(draw.y),
                Object::Real(draw.width),
                Object::Real(draw.height),
            ],
        ));
        operations.push(Operation::new("f", vec![]));
    }

    operations.push(Operation::new("Q", vec![]));

    Content { operations }.encode().map_err(|e| e.to_string())
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn box_values(arr: &[Object]) -> Option<(f32, f32, f32, f32)> {
    let values: Vec<f32> = arr.iter().filter_map(number).collect();
    if values.len() == 4 {
        Some((values[0], values[1], values[2], values[3]))
    } else {
        None
    }
}

/// Height of the page's visible area: CropBox when present, MediaBox
/// otherwise, inherited from the parent node as a last resort.
fn page_height(doc: &Document, page_id: lopdf::ObjectId) -> f32 {
    let raw_box = if let Ok(Object::Dictionary(dict)) = doc.get_object(page_id) {
        if let Ok(Object::Array(arr)) = dict.get(b"CropBox") {
            box_values(arr)
        } else if let Ok(Object::Array(arr)) = dict.get(b"MediaBox") {
            box_values(arr)
        } else if let Ok(Object::Reference(parent_ref)) = dict.get(b"Parent") {
            if let Ok(Object::Dictionary(parent)) = doc.get_object(*parent_ref) {
                if let Ok(Object::Array(arr)) = parent.get(b"MediaBox") {
                    box_values(arr)
                } else {
                    None
                }
            } else {
                None
            }
        } else {
            None
        }
    } else {
        None
    };

    let (_, lly, _, ury) = raw_box.unwrap_or_else(|| {
        log::warn!("page without MediaBox, assuming Letter");
        (0.0, 0.0, 612.0, 792.0)
    });
    ury - lly
}

fn stream_content(stream: &Stream) -> Vec<u8> {
    match stream.decompressed_content() {
        Ok(data) => data,
        Err(_) => stream.content.clone(),
    }
}

/// Concatenated content stream data for one page. A page without a
/// Contents entry yields empty data, not an error.
fn page_content(doc: &Document, page_id: lopdf::ObjectId) -> Result<Vec<u8>, String> {
    let page = doc.get_object(page_id).map_err(|e| e.to_string())?;
    let dict = match page {
        Object::Dictionary(dict) => dict,
        _ => return Err("page object is not a dictionary".to_string()),
    };

    match dict.get(b"Contents") {
        Ok(Object::Reference(ref_id)) => {
            if let Ok(Object::Stream(stream)) = doc.get_object(*ref_id) {
                Ok(stream_content(stream))
            } else {
                Ok(Vec::new())
            }
        }
        Ok(Object::Array(arr)) => {
            let mut all = Vec::new();
            for item in arr {
                if let Object::Reference(ref_id) = item {
                    if let Ok(Object::Stream(stream)) = doc.get_object(*ref_id) {
                        all.extend(stream_content(stream));
                        all.push(b'\n');
                    }
                }
            }
            Ok(all)
        }
        Ok(Object::Stream(stream)) => Ok(stream_content(stream)),
        _ => Ok(Vec::new()),
    }
}

//! Box arithmetic shared by the detector and the redactor.

use crate::model::BoundingBox;

impl BoundingBox {
    /// True when the two boxes share any area.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Area of the overlap between the two boxes, zero when disjoint.
    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Tightest box enclosing every input box. `None` for an empty input.
pub fn merge_boxes<'a, I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let mut iter = boxes.into_iter();
    let first = *iter.next()?;
    let mut left = first.x;
    let mut top = first.y;
    let mut right = first.right();
    let mut bottom = first.bottom();

    for b in iter {
        left = left.min(b.x);
        top = top.min(b.y);
        right = right.max(b.right());
        bottom = bottom.max(b.bottom());
    }

    Some(BoundingBox::new(left, top, right - left, bottom - top))
}

/// Converts a top-left-origin, y-down box into bottom-left-origin, y-up
/// drawing coordinates for a page of the given height.
///
/// Extraction geometry has the origin at the top-left corner; PDF drawing
/// operators expect the origin at the bottom-left, so only the y component
/// moves: `draw_y = page_height - y - height`.
pub fn flip_vertical(bbox: &BoundingBox, page_height: f32) -> BoundingBox {
    BoundingBox::new(
        bbox.x,
        page_height - bbox.y - bbox.height,
        bbox.width,
        bbox.height,
    )
}

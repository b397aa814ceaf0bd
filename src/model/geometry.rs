//! Page geometry.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinates.
///
/// Uses the decoder's convention: `(x0, y0)` is the bottom-left corner and
/// `(x1, y1)` the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of a sequence of boxes, or `None` if it is empty.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BBox>, b| match acc {
                Some(acc) => Some(acc.union(b)),
                None => Some(*b),
            })
    }
}

/// The content region of a page.
///
/// Anything not fully inside the frame (running headers, footers, page
/// numbers, marginal notes) is treated as page furniture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl Frame {
    /// Create a new frame.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Check whether the frame fully contains `bbox`.
    ///
    /// Boundary contact counts as containment; any overhang does not.
    pub fn contains(&self, bbox: &BBox) -> bool {
        self.x0 <= bbox.x0 && self.y0 <= bbox.y0 && bbox.x1 <= self.x1 && bbox.y1 <= self.y1
    }
}

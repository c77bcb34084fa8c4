use serde::{Deserialize, Serialize};

/// A struct representing a bounding box.
///
/// A bounding box is the rectangle an object detection model predicts around an
/// object in an image. An ideal bounding box is the smallest box that totally
/// contains the object within the image. This project uses the standard
/// convention of the left side of the image being x=0 and the top of the image
/// being y=0; once a box leaves the decoder its coordinates are pixels in
/// original-image space.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBox {
    /// Checks if a box has valid parameters before constructing.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self, String> {
        if left > right {
            Err(format!(
                "Failed to create BoundingBox, value for left > value for right ({} > {}).",
                left, right
            ))
        } else if top > bottom {
            Err(format!(
                "Failed to create BoundingBox, value for top > value for bottom ({} > {}).",
                top, bottom
            ))
        } else {
            Ok(BoundingBox {
                left,
                top,
                right,
                bottom,
            })
        }
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Computes the intersection over union between this box and another.
    ///
    /// The result is the overlap area divided by the area the two rectangles
    /// cover together, a value in [0, 1]. Two boxes whose union has zero area
    /// yield 0 rather than dividing by zero.
    pub fn intersection_over_union(&self, other: &BoundingBox) -> f32 {
        let overlap_left = self.left.max(other.left);
        let overlap_top = self.top.max(other.top);
        let overlap_right = self.right.min(other.right);
        let overlap_bottom = self.bottom.min(other.bottom);
        let intersection =
            (overlap_right - overlap_left).max(0.0) * (overlap_bottom - overlap_top).max(0.0);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

//! Geometry primitives shared by the annotation and overlay layers.
//!
//! All coordinates are in image pixels at the OCR engine's native
//! resolution; scaling to display units happens only in the overlay layer.

use serde::{Deserialize, Serialize};

/// Maximum display envelope the source raster is fitted into.
pub const MAX_DISPLAY_WIDTH: f64 = 800.0;
pub const MAX_DISPLAY_HEIGHT: f64 = 600.0;

/// Axis-aligned rectangle in image-pixel coordinates.
///
/// Invariant: `x0 <= x1` and `y0 <= y1`. The constructor normalizes
/// swapped corners so the invariant holds for any input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Minimal enclosing rectangle of `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Ratio applied when fitting a source raster into the display envelope.
///
/// Computed once per uploaded image. Images smaller than the envelope are
/// never upscaled.
pub fn fit_scale(img_width: u32, img_height: u32) -> f64 {
    if img_width == 0 || img_height == 0 {
        return 1.0;
    }
    let scale = (MAX_DISPLAY_WIDTH / img_width as f64)
        .min(MAX_DISPLAY_HEIGHT / img_height as f64);
    scale.min(1.0)
}

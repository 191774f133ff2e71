//! Highlight overlay projection
//!
//! Maps logical bounding boxes (word or sentence level) to screen-space
//! rectangles at the current display scale, and resolves click events back
//! to the box that produced them. The overlay is always rebuilt wholesale
//! when the active box collection changes so no stale rectangle can survive
//! a mode switch.

use serde::{Deserialize, Serialize};

use crate::annotate::{SentenceUnit, WordUnit};
use crate::geometry::BoundingBox;

/// Screen-space rectangle for one highlight box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    /// Project a bounding box into display units.
    pub fn project(bbox: &BoundingBox, scale: f64) -> Self {
        Self {
            left: bbox.x0 * scale,
            top: bbox.y0 * scale,
            width: bbox.width() * scale,
            height: bbox.height() * scale,
        }
    }
}

/// Payload carried by a highlight box, dispatched on click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClickTarget {
    Word(WordUnit),
    Sentence(SentenceUnit),
}

impl ClickTarget {
    pub fn text(&self) -> &str {
        match self {
            ClickTarget::Word(w) => &w.text,
            ClickTarget::Sentence(s) => &s.text,
        }
    }
}

/// One projected highlight box with its click payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayBox {
    pub rect: OverlayRect,
    pub target: ClickTarget,
}

/// The full overlay surface for the current mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overlay {
    boxes: Vec<OverlayBox>,
}

impl Overlay {
    /// Replace the entire overlay with projections of `targets` at `scale`.
    ///
    /// The previous set is discarded before the new one is built; partial
    /// or incremental patching is deliberately not supported.
    pub fn rebuild<I>(&mut self, targets: I, scale: f64)
    where
        I: IntoIterator<Item = ClickTarget>,
    {
        self.boxes = targets
            .into_iter()
            .map(|target| {
                let bbox = match &target {
                    ClickTarget::Word(w) => w.bbox,
                    ClickTarget::Sentence(s) => s.bbox,
                };
                OverlayBox {
                    rect: OverlayRect::project(&bbox, scale),
                    target,
                }
            })
            .collect();
    }

    /// Resolve a click on box `index` to its payload.
    ///
    /// Out-of-range indices are a no-op rather than an error; clicks can
    /// race a rebuild that shrank the set.
    pub fn dispatch_click(&self, index: usize) -> Option<&ClickTarget> {
        self.boxes.get(index).map(|b| &b.target)
    }

    pub fn boxes(&self) -> &[OverlayBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

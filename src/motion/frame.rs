use serde::{Deserialize, Serialize};

/// Vertical geometry of an element relative to the viewport, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Zero-size or non-finite boxes cannot be measured against the viewport.
    pub fn is_measurable(&self) -> bool {
        self.top.is_finite() && self.bottom.is_finite() && self.height() > 0.0
    }
}

/// One consistent snapshot of the page taken at the start of an animation
/// frame. Everything derived within the frame reads this, never the live DOM.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSample {
    pub timestamp_ms: f64,
    pub delta_ms: f64,
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl FrameSample {
    /// How far the document can scroll at all.
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// Binary scroll state with a fixed offset, e.g. the navbar switching to its
/// compact style once the page has scrolled a little.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThreshold {
    offset: f64,
}

impl ScrollThreshold {
    pub const NAVBAR: ScrollThreshold = ScrollThreshold { offset: 20.0 };
    pub const SCROLL_TO_TOP: ScrollThreshold = ScrollThreshold { offset: 400.0 };

    pub fn new(offset: f64) -> Self {
        Self {
            offset: if offset.is_finite() { offset.max(0.0) } else { 0.0 },
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Strictly past the offset: a page resting exactly at it is not "scrolled".
    pub fn is_past(&self, sample: &FrameSample) -> bool {
        sample.scroll_y > self.offset
    }
}

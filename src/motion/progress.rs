use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::frame::{BoundingBox, FrameSample};

/// A point where an edge of the element meets a line across the viewport.
///
/// Both positions are fractions: `element` from the element's top (0.0) to
/// its bottom (1.0), `viewport` from the top of the viewport (0.0) to its
/// bottom (1.0). Parses from the usual `"<element> <viewport>"` notation, e.g.
/// `"top 80%"`, `"start end"`, `"bottom center"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnchorParseError {
    #[error("Anchor is empty")]
    Empty,
    #[error("Anchor needs an element position and a viewport position, got {0:?}")]
    Arity(String),
    #[error("Unknown anchor position {0:?}")]
    UnknownPosition(String),
    #[error("Invalid anchor percentage {0:?}")]
    BadPercent(String),
}

fn parse_position(s: &str) -> Result<f64, AnchorParseError> {
    match s {
        "top" | "start" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" | "end" => Ok(1.0),
        _ => {
            let Some(pct) = s.strip_suffix('%') else {
                return Err(AnchorParseError::UnknownPosition(s.to_string()));
            };
            match pct.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v / 100.0),
                _ => Err(AnchorParseError::BadPercent(s.to_string())),
            }
        }
    }
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();
        match parts.as_slice() {
            [] => Err(AnchorParseError::Empty),
            [element, viewport] => Ok(Anchor {
                element: parse_position(&element.to_ascii_lowercase())?,
                viewport: parse_position(&viewport.to_ascii_lowercase())?,
            }),
            _ => Err(AnchorParseError::Arity(s.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.element * 100.0, self.viewport * 100.0)
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Anchor {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this anchor is reached, given the element's
    /// current viewport-relative box and the scroll offset it was measured at.
    pub fn scroll_offset(&self, bounds: &BoundingBox, sample: &FrameSample) -> f64 {
        let document_top = bounds.top + sample.scroll_y;
        document_top + self.element * bounds.height() - self.viewport * sample.viewport_height
    }
}

/// Normalized position of `scroll_y` inside `[start, end]`. Anything that is
/// not a positive span yields 0.
pub fn span_progress(scroll_y: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if !(span > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    let p = (scroll_y - start) / span;
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Progress of an element between two anchors at the sampled scroll offset.
pub fn track(bounds: &BoundingBox, start: Anchor, end: Anchor, sample: &FrameSample) -> f64 {
    if !bounds.is_measurable() {
        return 0.0;
    }
    span_progress(
        sample.scroll_y,
        start.scroll_offset(bounds, sample),
        end.scroll_offset(bounds, sample),
    )
}

/// Progress of the whole page, 0 at the top and 1 when fully scrolled.
pub fn document_progress(sample: &FrameSample) -> f64 {
    span_progress(sample.scroll_y, 0.0, sample.scrollable_height())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressTarget {
    Document,
    Element { start: Anchor, end: Anchor },
}

#[derive(Debug, Clone)]
pub struct ScrollProgressTracker {
    target: ProgressTarget,
    progress: f64,
    connected: bool,
}

impl ScrollProgressTracker {
    pub fn document() -> Self {
        Self::new(ProgressTarget::Document)
    }

    pub fn element(start: Anchor, end: Anchor) -> Self {
        Self::new(ProgressTarget::Element { start, end })
    }

    fn new(target: ProgressTarget) -> Self {
        Self {
            target,
            progress: 0.0,
            connected: true,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Recompute from a fresh measurement. Geometry is never cached between
    /// samples so layout changes are picked up on the next frame.
    pub fn measure(&mut self, bounds: Option<BoundingBox>, sample: &FrameSample) -> f64 {
        if !self.connected {
            return self.progress;
        }
        self.progress = match self.target {
            ProgressTarget::Document => document_progress(sample),
            ProgressTarget::Element { start, end } => bounds
                .map(|b| track(&b, start, end, sample))
                .unwrap_or(0.0),
        };
        self.progress
    }

    pub fn teardown(&mut self) {
        self.connected = false;
    }
}

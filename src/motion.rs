//! Scroll-reveal and progress animation engine.
//!
//! Everything here is plain state driven by the caller: a frame sample or a
//! tick goes in, numbers come out. Nothing touches the DOM or owns a timer,
//! which keeps it testable off the browser. `crate::app` wires it to the page.

pub mod config;
pub mod counter;
pub mod frame;
pub mod interpolate;
pub mod progress;
pub mod reveal;
pub mod spring;
pub mod timer;
pub mod variants;
pub mod viewport;

pub use config::MotionConfig;
pub use counter::{CounterAnimator, CounterPhase, CounterState};
pub use frame::{BoundingBox, FrameSample, ScrollThreshold};
pub use interpolate::map_range;
pub use progress::{Anchor, AnchorParseError, ScrollProgressTracker};
pub use reveal::{RevealGroup, RevealSequencer, SequencePhase, StaggerTiming};
pub use spring::{SmoothedValue, SpringConfig, SpringSmoother};
pub use timer::TimerQueue;
pub use variants::{Variants, VisualState, VisualTransform};
pub use viewport::{Intersection, ObserveMode, ObserveOptions, ObservedTarget, ViewportObserver};

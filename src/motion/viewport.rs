use log::debug;

use super::frame::BoundingBox;

/// Whether an observer latches after the first entry or keeps reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserveMode {
    /// Report the first entry, then go quiet for the rest of the lifecycle.
    #[default]
    TriggerOnce,
    /// Report every change of visibility or ratio.
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Minimum visible fraction of the element, `0.0..=1.0`. Zero means any
    /// visible pixel counts.
    pub threshold: f64,
    pub mode: ObserveMode,
    /// Inset in px applied to both viewport edges before measuring.
    pub margin: f64,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            mode: ObserveMode::TriggerOnce,
            margin: 0.0,
        }
    }
}

impl ObserveOptions {
    pub fn once(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn continuous(threshold: f64) -> Self {
        Self {
            threshold,
            mode: ObserveMode::Continuous,
            ..Default::default()
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    fn threshold(&self) -> f64 {
        if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn margin(&self) -> f64 {
        if self.margin.is_finite() {
            self.margin
        } else {
            0.0
        }
    }
}

/// A single observation reported to the subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub intersecting: bool,
    pub ratio: f64,
}

/// Registered element and what the observer last knew about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedTarget {
    pub id: String,
    pub bounding_box: BoundingBox,
    pub has_entered_viewport: bool,
    pub intersection_ratio: f64,
}

impl ObservedTarget {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounding_box: BoundingBox::default(),
            has_entered_viewport: false,
            intersection_ratio: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObserverState {
    Observing,
    Latched,
    Disconnected,
}

/// Fraction of `bounds` inside the viewport `[margin, viewport_height - margin]`.
pub fn intersection_ratio(bounds: &BoundingBox, viewport_height: f64, margin: f64) -> f64 {
    if !bounds.is_measurable() || !viewport_height.is_finite() {
        return 0.0;
    }
    let view_top = margin;
    let view_bottom = viewport_height - margin;
    if view_bottom <= view_top {
        return 0.0;
    }
    let visible = bounds.bottom.min(view_bottom) - bounds.top.max(view_top);
    if visible <= 0.0 {
        return 0.0;
    }
    (visible / bounds.height()).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct ViewportObserver {
    target: ObservedTarget,
    options: ObserveOptions,
    state: ObserverState,
    last: Option<Intersection>,
}

impl ViewportObserver {
    pub fn new(id: impl Into<String>, options: ObserveOptions) -> Self {
        Self {
            target: ObservedTarget::new(id),
            options,
            state: ObserverState::Observing,
            last: None,
        }
    }

    pub fn target(&self) -> &ObservedTarget {
        &self.target
    }

    pub fn mode(&self) -> ObserveMode {
        self.options.mode
    }

    pub fn has_entered(&self) -> bool {
        self.target.has_entered_viewport
    }

    pub fn is_connected(&self) -> bool {
        self.state != ObserverState::Disconnected
    }

    /// No further sample can report anything: latched after a single entry,
    /// or torn down.
    pub fn is_spent(&self) -> bool {
        self.state != ObserverState::Observing
    }

    /// Feed one measurement of the element. `None` means the element could not
    /// be measured this frame and counts as fully outside the viewport.
    ///
    /// Returns the observation to report, if any.
    pub fn sample(
        &mut self,
        bounds: Option<BoundingBox>,
        viewport_height: f64,
    ) -> Option<Intersection> {
        if self.state != ObserverState::Observing {
            return None;
        }

        let bounds = bounds.unwrap_or_default();
        let ratio = intersection_ratio(&bounds, viewport_height, self.options.margin());
        let threshold = self.options.threshold();
        let intersecting = ratio > 0.0 && ratio >= threshold;

        self.target.bounding_box = bounds;
        self.target.intersection_ratio = ratio;
        let event = Intersection {
            intersecting,
            ratio,
        };

        match self.options.mode {
            ObserveMode::TriggerOnce => {
                if !intersecting {
                    return None;
                }
                self.target.has_entered_viewport = true;
                self.state = ObserverState::Latched;
                self.last = Some(event);
                debug!("viewport: {} entered (ratio {:.2}), latched", self.target.id, ratio);
                Some(event)
            }
            ObserveMode::Continuous => {
                self.target.has_entered_viewport = intersecting;
                let changed = match self.last {
                    None => true,
                    Some(last) => {
                        last.intersecting != intersecting
                            || (last.ratio - ratio).abs() > f64::EPSILON
                    }
                };
                if changed {
                    self.last = Some(event);
                    Some(event)
                } else {
                    None
                }
            }
        }
    }

    /// Element is gone. Nothing is reported after this.
    pub fn teardown(&mut self) {
        if self.state != ObserverState::Disconnected {
            debug!("viewport: {} disconnected", self.target.id);
            self.state = ObserverState::Disconnected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    // Element of height 200 whose top sits at `top` in viewport coordinates
    fn card(top: f64) -> Option<BoundingBox> {
        Some(BoundingBox::new(top, 200.0))
    }

    #[test]
    fn test_ratio() {
        assert_eq!(intersection_ratio(&BoundingBox::new(100.0, 200.0), VH, 0.0), 1.0);
        assert_eq!(intersection_ratio(&BoundingBox::new(700.0, 200.0), VH, 0.0), 0.5);
        assert_eq!(intersection_ratio(&BoundingBox::new(-150.0, 200.0), VH, 0.0), 0.25);
        assert_eq!(intersection_ratio(&BoundingBox::new(900.0, 200.0), VH, 0.0), 0.0);
        // margin pushes the bottom edge of the viewport up
        assert_eq!(intersection_ratio(&BoundingBox::new(600.0, 200.0), VH, 100.0), 0.5);
        assert_eq!(intersection_ratio(&BoundingBox::new(600.0, 200.0), VH, 400.0), 0.0);
        // zero height never counts
        assert_eq!(intersection_ratio(&BoundingBox::new(100.0, 0.0), VH, 0.0), 0.0);
    }

    #[test]
    fn test_trigger_once_latches() {
        let mut observer = ViewportObserver::new("card", ObserveOptions::once(0.3));

        assert_eq!(observer.sample(card(900.0), VH), None);
        // 20% visible, below threshold
        assert_eq!(observer.sample(card(760.0), VH), None);
        assert!(!observer.has_entered());

        let entered = observer.sample(card(700.0), VH).expect("should report entry");
        assert!(entered.intersecting);
        assert_eq!(entered.ratio, 0.5);
        assert!(observer.has_entered());

        // scroll out and back in repeatedly: nothing more is reported
        let mut reports = 1;
        for top in [1000.0, 300.0, -500.0, 100.0, 900.0, 100.0] {
            if observer.sample(card(top), VH).is_some() {
                reports += 1;
            }
        }
        assert_eq!(reports, 1);
        assert!(observer.has_entered());
    }

    #[test]
    fn test_continuous_reports_changes() {
        let mut observer = ViewportObserver::new("bar", ObserveOptions::continuous(0.5));

        let first = observer.sample(card(900.0), VH).expect("first sample is reported");
        assert!(!first.intersecting);
        // unchanged: quiet
        assert_eq!(observer.sample(card(950.0), VH), None);

        let partial = observer.sample(card(750.0), VH).expect("ratio changed");
        assert!(!partial.intersecting);
        assert_eq!(partial.ratio, 0.25);

        let inside = observer.sample(card(200.0), VH).expect("entered");
        assert!(inside.intersecting);
        assert!(observer.has_entered());

        let outside = observer.sample(card(-400.0), VH).expect("left");
        assert!(!outside.intersecting);
        assert!(!observer.has_entered());
    }

    #[test]
    fn test_unmeasurable_element_is_not_entered() {
        let mut observer = ViewportObserver::new("empty", ObserveOptions::once(0.0));
        assert_eq!(observer.sample(None, VH), None);
        assert_eq!(observer.sample(Some(BoundingBox::new(10.0, 0.0)), VH), None);
        assert!(!observer.has_entered());
        assert_eq!(observer.target().intersection_ratio, 0.0);
    }

    #[test]
    fn test_teardown_stops_reporting() {
        let mut observer = ViewportObserver::new("gone", ObserveOptions::continuous(0.0));
        observer.sample(card(900.0), VH);
        assert!(!observer.is_spent());
        observer.teardown();
        assert!(!observer.is_connected());
        assert!(observer.is_spent());

        let before = observer.target().clone();
        for top in [0.0, 100.0, 400.0] {
            assert_eq!(observer.sample(card(top), VH), None);
        }
        assert_eq!(observer.target(), &before);
    }

    #[test]
    fn test_trigger_once_is_spent_after_entry() {
        let mut observer = ViewportObserver::new("hero", ObserveOptions::once(0.5));
        observer.sample(card(900.0), VH);
        assert!(!observer.is_spent());
        observer.sample(card(200.0), VH).expect("entered");
        assert!(observer.is_spent());
        assert!(observer.is_connected());

        let mut continuous = ViewportObserver::new("bar", ObserveOptions::continuous(0.0));
        continuous.sample(card(200.0), VH);
        assert!(!continuous.is_spent());
    }
}

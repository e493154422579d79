use leptos::{html, prelude::*};
use leptos_use::{use_interval_fn_with_options, utils::Pausable, UseIntervalFnOptions};

use crate::{
    content::SITE,
    motion::{
        counter::{format_count, whole_tick_ms},
        Anchor, BoundingBox, CounterAnimator, FrameSample, ObserveOptions, RevealGroup,
        RevealSequencer, ScrollProgressTracker, SequencePhase, SpringConfig, SpringSmoother,
        StaggerTiming, ViewportObserver,
    },
};

use super::frame::{element_box, use_frame};

/// Whether `node` has entered the viewport. With a trigger-once observer this
/// flips to true a single time and stays there.
pub fn use_in_view(node: NodeRef<html::Div>, id: &str, options: ObserveOptions) -> Signal<bool> {
    let frame = use_frame();
    let in_view = RwSignal::new(false);
    let observer = StoredValue::new(ViewportObserver::new(id, options));

    Effect::new(move |_| {
        // returning before the frame read drops the subscription for good
        if observer
            .try_with_value(ViewportObserver::is_spent)
            .unwrap_or(true)
        {
            return;
        }
        let sample = frame.get();
        let bounds = element_box(node);
        let event = observer
            .try_update_value(|o| o.sample(bounds, sample.viewport_height))
            .flatten();
        if let Some(event) = event {
            in_view.set(event.intersecting);
        }
    });

    on_cleanup(move || {
        observer.try_update_value(|o| o.teardown());
    });

    in_view.into()
}

/// Scroll progress of the whole page.
pub fn use_document_progress() -> Signal<f64> {
    use_scroll_progress(None, ScrollProgressTracker::document())
}

/// Scroll progress of `node` between two anchors.
pub fn use_element_progress(
    node: NodeRef<html::Div>,
    start: Anchor,
    end: Anchor,
) -> Signal<f64> {
    use_scroll_progress(Some(node), ScrollProgressTracker::element(start, end))
}

fn use_scroll_progress(
    node: Option<NodeRef<html::Div>>,
    tracker: ScrollProgressTracker,
) -> Signal<f64> {
    let frame = use_frame();
    let progress = RwSignal::new(0.0);
    let tracker = StoredValue::new(tracker);

    Effect::new(move |_| {
        if !tracker
            .try_with_value(ScrollProgressTracker::is_connected)
            .unwrap_or(false)
        {
            return;
        }
        let sample = frame.get();
        let bounds = node.and_then(element_box);
        if let Some(p) = tracker.try_update_value(|t| t.measure(bounds, &sample)) {
            if p != progress.get_untracked() {
                progress.set(p);
            }
        }
    });

    on_cleanup(move || {
        tracker.try_update_value(|t| t.teardown());
    });

    progress.into()
}

/// A spring stepped by the frame clock.
///
/// Time only advances when the frame timestamp does, so several input
/// changes inside one frame just move the target. Once settled the clock is
/// forgotten and the next change starts from a zero-length step.
struct SpringDriver {
    spring: SpringSmoother,
    last_frame: Option<f64>,
}

impl SpringDriver {
    fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            spring: SpringSmoother::new(config, initial),
            last_frame: None,
        }
    }

    fn is_idle(&self, raw: f64) -> bool {
        self.spring.is_at_rest() && (self.spring.target() == raw || !raw.is_finite())
    }

    fn frame(&mut self, raw: f64, sample: &FrameSample) -> f64 {
        let dt = self
            .last_frame
            .map(|t| sample.timestamp_ms - t)
            .unwrap_or(0.0);
        self.last_frame = Some(sample.timestamp_ms);
        let value = self.spring.advance(raw, dt);
        if self.spring.is_at_rest() {
            self.last_frame = None;
        }
        value
    }

    fn teardown(&mut self) {
        self.spring.teardown();
    }
}

/// Follow `source` through a spring, one step per frame.
pub fn use_spring(source: Signal<f64>, config: SpringConfig) -> Signal<f64> {
    let frame = use_frame();
    let initial = source.get_untracked();
    let output = RwSignal::new(initial);
    let driver = StoredValue::new(SpringDriver::new(config, initial));

    Effect::new(move |_| {
        let raw = source.get();
        // a settled spring waits on its source alone
        if driver.try_with_value(|d| d.is_idle(raw)).unwrap_or(true) {
            return;
        }
        let sample = frame.get();
        if let Some(v) = driver.try_update_value(|d| d.frame(raw, &sample)) {
            if v != output.get_untracked() {
                output.set(v);
            }
        }
    });

    on_cleanup(move || {
        driver.try_update_value(SpringDriver::teardown);
    });

    output.into()
}

/// Per-child reveal progress of a staggered group. Values run from 0.0 to 1.0
/// through the entrance spring and may overshoot slightly.
#[derive(Debug, Clone, Copy)]
pub struct RevealProgress {
    progress: RwSignal<Vec<f64>>,
}

impl RevealProgress {
    pub fn get(&self, index: usize) -> f64 {
        self.progress
            .with(|p| p.get(index).copied().unwrap_or(0.0))
    }
}

struct RevealDriver {
    sequencer: RevealSequencer<usize>,
    springs: Vec<SpringSmoother>,
    last_frame: Option<f64>,
    start_on_mount: bool,
}

impl RevealDriver {
    fn new(
        sequencer: RevealSequencer<usize>,
        config: SpringConfig,
        start_on_mount: bool,
    ) -> Self {
        let springs = (0..sequencer.group().len())
            .map(|_| SpringSmoother::new(config, 0.0))
            .collect();
        Self {
            sequencer,
            springs,
            last_frame: None,
            start_on_mount,
        }
    }

    /// Advance one frame. The container is only measured while the sequence
    /// is waiting for it. Returns fresh child values unless everything is
    /// still at rest.
    fn frame(
        &mut self,
        measure: impl FnOnce() -> Option<BoundingBox>,
        sample: &FrameSample,
    ) -> Option<Vec<f64>> {
        let dt = self
            .last_frame
            .map(|t| sample.timestamp_ms - t)
            .unwrap_or(0.0);
        self.last_frame = Some(sample.timestamp_ms);

        if self.start_on_mount && sample.viewport_height > 0.0 {
            self.sequencer.trigger(sample.timestamp_ms);
        }
        let waiting = self.sequencer.phase() == SequencePhase::Waiting;
        let bounds = if waiting && !self.start_on_mount {
            measure()
        } else {
            None
        };
        for index in self
            .sequencer
            .observe(bounds, sample.viewport_height, sample.timestamp_ms)
        {
            if let Some(spring) = self.springs.get_mut(index) {
                spring.set_target(1.0);
            }
        }

        if self.springs.iter().all(SpringSmoother::is_at_rest) {
            return None;
        }
        Some(self.springs.iter_mut().map(|s| s.step(dt)).collect())
    }

    /// Every child has fired and settled, or the group is gone.
    fn is_spent(&self) -> bool {
        match self.sequencer.phase() {
            SequencePhase::Cancelled => true,
            SequencePhase::Complete { .. } => self.springs.iter().all(SpringSmoother::is_at_rest),
            _ => false,
        }
    }

    fn teardown(&mut self) {
        self.sequencer.teardown();
        self.springs.iter_mut().for_each(SpringSmoother::teardown);
    }
}

/// Staggered entrance of `count` children once `node` scrolls into view.
pub fn use_reveal_group(
    node: NodeRef<html::Div>,
    id: &str,
    count: usize,
    timing: StaggerTiming,
) -> RevealProgress {
    let motion = &SITE.motion;
    let observer = ViewportObserver::new(
        id,
        ObserveOptions::once(0.0).with_margin(motion.section_margin),
    );
    let group = RevealGroup::with_children(timing, 0..count);
    drive_reveal(Some(node), RevealSequencer::new(group, observer), false)
}

/// Staggered entrance of `count` children as soon as the page is measured.
pub fn use_mount_sequence(count: usize, timing: StaggerTiming) -> RevealProgress {
    let group = RevealGroup::with_children(timing, 0..count);
    drive_reveal(None, RevealSequencer::manual(group), true)
}

fn drive_reveal(
    node: Option<NodeRef<html::Div>>,
    sequencer: RevealSequencer<usize>,
    start_on_mount: bool,
) -> RevealProgress {
    let frame = use_frame();
    let progress = RwSignal::new(vec![0.0; sequencer.group().len()]);
    let driver = StoredValue::new(RevealDriver::new(
        sequencer,
        SITE.motion.bouncy,
        start_on_mount,
    ));

    Effect::new(move |_| {
        if driver.try_with_value(RevealDriver::is_spent).unwrap_or(true) {
            return;
        }
        let sample = frame.get();
        if let Some(values) = driver
            .try_update_value(|d| d.frame(|| node.and_then(element_box), &sample))
            .flatten()
        {
            progress.set(values);
        }
    });

    on_cleanup(move || {
        driver.try_update_value(RevealDriver::teardown);
    });

    RevealProgress { progress }
}

/// Text of a number that counts up from zero once `node` is in view.
pub fn use_counter(
    node: NodeRef<html::Div>,
    id: &str,
    target: f64,
    suffix: String,
) -> Signal<String> {
    let motion = &SITE.motion;
    let tick_ms = whole_tick_ms(motion.counter_tick_ms);
    let frame = use_frame();
    let text = RwSignal::new(format_count(0.0, target, &suffix));
    let finished = RwSignal::new(false);
    let counter = StoredValue::new(CounterAnimator::with_tick(
        target,
        motion.counter_duration_ms,
        tick_ms,
    ));
    let observer = StoredValue::new(ViewportObserver::new(
        id,
        ObserveOptions::once(motion.reveal_threshold),
    ));

    let Pausable { pause, resume, .. } = use_interval_fn_with_options(
        move || {
            let update = counter
                .try_update_value(|c| c.step().map(|_| (c.display(&suffix), c.is_complete())))
                .flatten();
            if let Some((shown, done)) = update {
                text.set(shown);
                if done {
                    finished.set(true);
                }
            }
        },
        tick_ms as u64,
        UseIntervalFnOptions::default().immediate(false),
    );

    Effect::new(move |_| {
        if observer
            .try_with_value(ViewportObserver::is_spent)
            .unwrap_or(true)
        {
            return;
        }
        let sample = frame.get();
        let bounds = element_box(node);
        let Some(event) = observer
            .try_update_value(|o| o.sample(bounds, sample.viewport_height))
            .flatten()
        else {
            return;
        };
        let started = counter
            .try_update_value(|c| c.on_intersection(&event, sample.timestamp_ms))
            .unwrap_or(false);
        if started {
            resume();
        }
    });

    Effect::watch(
        move || finished.get(),
        move |done, _, _| {
            if *done {
                pause();
            }
        },
        false,
    );

    on_cleanup(move || {
        observer.try_update_value(|o| o.teardown());
        counter.try_update_value(|c| c.teardown());
    });

    text.into()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn sample(timestamp_ms: f64, top: f64) -> (Option<BoundingBox>, FrameSample) {
        let sample = FrameSample {
            timestamp_ms,
            delta_ms: 16.0,
            scroll_y: 0.0,
            viewport_height: 800.0,
            document_height: 4000.0,
        };
        (Some(BoundingBox::new(top, 300.0)), sample)
    }

    fn at(timestamp_ms: f64) -> FrameSample {
        FrameSample {
            timestamp_ms,
            ..FrameSample::default()
        }
    }

    fn driver(count: usize) -> RevealDriver {
        let group = RevealGroup::with_children(StaggerTiming::new(100.0, 0.0), 0..count);
        let observer = ViewportObserver::new("group", ObserveOptions::once(0.0));
        RevealDriver::new(
            RevealSequencer::new(group, observer),
            SpringConfig::BOUNCY,
            false,
        )
    }

    fn no_container() -> Option<BoundingBox> {
        panic!("mount sequences have no container to measure")
    }

    #[test]
    fn test_idle_until_visible() {
        let mut d = driver(3);
        for t in 0..10 {
            let (bounds, s) = sample(t as f64 * 16.0, 2000.0);
            assert_eq!(d.frame(|| bounds, &s), None);
        }
        assert!(!d.is_spent());
    }

    #[test]
    fn test_children_settle_in_order() {
        let mut d = driver(3);
        let mut last = vec![0.0; 3];
        let mut t = 0.0;
        while t < 3000.0 {
            let (bounds, s) = sample(t, 100.0);
            if let Some(values) = d.frame(|| bounds, &s) {
                last = values;
            }
            if (150.0..200.0).contains(&t) {
                // first child is moving, the last has not started
                assert!(last[0] > 0.0);
                assert_eq!(last[2], 0.0);
            }
            t += 16.0;
        }
        assert_eq!(last, vec![1.0, 1.0, 1.0]);
        assert!(d.is_spent());
        let (bounds, s) = sample(t, 100.0);
        assert_eq!(d.frame(|| bounds, &s), None);
    }

    #[test]
    fn test_measures_only_while_waiting() {
        let mut d = driver(2);
        let measured = Cell::new(0);
        let mut t = 0.0;
        for _ in 0..5 {
            let (bounds, s) = sample(t, 2000.0);
            d.frame(
                || {
                    measured.set(measured.get() + 1);
                    bounds
                },
                &s,
            );
            t += 16.0;
        }
        assert_eq!(measured.get(), 5);

        while !d.is_spent() && t < 5000.0 {
            let (bounds, s) = sample(t, 100.0);
            d.frame(
                || {
                    measured.set(measured.get() + 1);
                    bounds
                },
                &s,
            );
            t += 16.0;
        }
        // the frame that saw the group enter was the last one measured
        assert_eq!(measured.get(), 6);
        assert!(d.is_spent());
    }

    #[test]
    fn test_mount_sequence_waits_for_measurement() {
        let group = RevealGroup::with_children(StaggerTiming::new(50.0, 0.0), 0..2);
        let mut d = RevealDriver::new(RevealSequencer::manual(group), SpringConfig::BOUNCY, true);
        let unmeasured = FrameSample::default();
        assert_eq!(d.frame(no_container, &unmeasured), None);
        let (_, s) = sample(100.0, 0.0);
        d.frame(no_container, &s);
        let (_, s) = sample(116.0, 0.0);
        let values = d.frame(no_container, &s).expect("first child should be moving");
        assert!(values[0] > 0.0);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut d = driver(2);
        let (bounds, s) = sample(0.0, 100.0);
        d.frame(|| bounds, &s);
        d.teardown();
        assert!(d.is_spent());
        let (bounds, s) = sample(5000.0, 100.0);
        // springs keep their last value once disconnected
        if let Some(values) = d.frame(|| bounds, &s) {
            assert!(values.iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn test_spring_first_frame_does_not_move() {
        let mut d = SpringDriver::new(SpringConfig::BOUNCY, 0.0);
        assert!(d.is_idle(0.0));
        assert!(!d.is_idle(1.0));
        // the page may have been open for minutes before the first change
        assert_eq!(d.frame(1.0, &at(90_000.0)), 0.0);
        let moved = d.frame(1.0, &at(90_016.0));
        assert!(moved > 0.0 && moved < 1.0);
    }

    #[test]
    fn test_spring_same_frame_changes_advance_time_once() {
        let mut d = SpringDriver::new(SpringConfig::BOUNCY, 0.0);
        d.frame(1.0, &at(0.0));
        let first = d.frame(1.0, &at(16.0));
        // a second source change inside frame 16 only retargets
        assert_eq!(d.frame(0.5, &at(16.0)), first);
        let next = d.frame(0.5, &at(32.0));

        let mut reference = SpringSmoother::new(SpringConfig::BOUNCY, 0.0);
        reference.advance(1.0, 0.0);
        assert_eq!(reference.advance(1.0, 16.0), first);
        reference.set_target(0.5);
        assert_eq!(reference.step(16.0), next);
    }

    #[test]
    fn test_spring_goes_idle_and_resumes_without_a_jump() {
        let mut d = SpringDriver::new(SpringConfig::BOUNCY, 0.0);
        let mut t = 0.0;
        while !d.is_idle(1.0) && t < 5000.0 {
            d.frame(1.0, &at(t));
            t += 16.0;
        }
        assert!(d.is_idle(1.0));
        assert!(d.is_idle(f64::NAN));

        // frames skipped while idle do not count as elapsed time
        assert_eq!(d.frame(0.0, &at(t + 60_000.0)), 1.0);
        let v = d.frame(0.0, &at(t + 60_016.0));
        assert!(v < 1.0 && v > 0.5);
    }
}

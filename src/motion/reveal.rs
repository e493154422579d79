use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    frame::BoundingBox,
    timer::TimerQueue,
    viewport::{ObserveMode, ViewportObserver},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerTiming {
    pub stagger_ms: f64,
    pub initial_delay_ms: f64,
}

impl Default for StaggerTiming {
    fn default() -> Self {
        Self {
            stagger_ms: 80.0,
            initial_delay_ms: 100.0,
        }
    }
}

impl StaggerTiming {
    pub const fn new(stagger_ms: f64, initial_delay_ms: f64) -> Self {
        Self {
            stagger_ms,
            initial_delay_ms,
        }
    }

    fn non_negative(v: f64) -> f64 {
        if v.is_finite() {
            v.max(0.0)
        } else {
            0.0
        }
    }

    /// Delay of the child at `index` relative to the trigger.
    pub fn delay_for(&self, index: usize) -> f64 {
        Self::non_negative(self.initial_delay_ms)
            + index as f64 * Self::non_negative(self.stagger_ms)
    }
}

/// Ordered children revealed together. Registration order is reveal order.
#[derive(Debug, Clone)]
pub struct RevealGroup<K> {
    children: Vec<K>,
    timing: StaggerTiming,
}

impl<K> RevealGroup<K> {
    pub fn new(timing: StaggerTiming) -> Self {
        Self {
            children: Vec::new(),
            timing,
        }
    }

    pub fn with_children(timing: StaggerTiming, children: impl IntoIterator<Item = K>) -> Self {
        Self {
            children: children.into_iter().collect(),
            timing,
        }
    }

    /// Append a child, returning its position.
    pub fn push(&mut self, child: K) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[K] {
        &self.children
    }

    pub fn timing(&self) -> StaggerTiming {
        self.timing
    }

    /// Per-child delays relative to the trigger, in child order.
    pub fn schedule(&self) -> Vec<f64> {
        (0..self.children.len())
            .map(|i| self.timing.delay_for(i))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencePhase {
    Waiting,
    Running { triggered_at: f64 },
    Complete { triggered_at: f64 },
    Cancelled,
}

/// Reveals the children of a group one after another once the container
/// first becomes visible.
#[derive(Debug, Clone)]
pub struct RevealSequencer<K> {
    group: RevealGroup<K>,
    observer: Option<ViewportObserver>,
    timers: TimerQueue<usize>,
    active: Vec<bool>,
    phase: SequencePhase,
}

impl<K> RevealSequencer<K> {
    /// Sequence driven by the container's observer. Only its first
    /// intersecting report matters; a continuous observer is switched to
    /// latch semantics by ignoring everything after it.
    pub fn new(group: RevealGroup<K>, observer: ViewportObserver) -> Self {
        if observer.mode() == ObserveMode::Continuous {
            debug!(
                "reveal: {} observed continuously, only the first entry triggers",
                observer.target().id
            );
        }
        Self::build(group, Some(observer))
    }

    /// Sequence started explicitly with [`RevealSequencer::trigger`].
    pub fn manual(group: RevealGroup<K>) -> Self {
        Self::build(group, None)
    }

    fn build(group: RevealGroup<K>, observer: Option<ViewportObserver>) -> Self {
        let active = vec![false; group.len()];
        Self {
            group,
            observer,
            timers: TimerQueue::new(),
            active,
            phase: SequencePhase::Waiting,
        }
    }

    pub fn group(&self) -> &RevealGroup<K> {
        &self.group
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Absolute activation time of each child, once triggered.
    pub fn activation_times(&self) -> Option<Vec<f64>> {
        match self.phase {
            SequencePhase::Running { triggered_at }
            | SequencePhase::Complete { triggered_at } => Some(
                self.group
                    .schedule()
                    .into_iter()
                    .map(|d| triggered_at + d)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Register another child after construction. If the sequence is already
    /// running it is scheduled at its own slot.
    pub fn push(&mut self, child: K) -> usize {
        let index = self.group.push(child);
        self.active.push(false);
        match self.phase {
            SequencePhase::Running { triggered_at }
            | SequencePhase::Complete { triggered_at } => {
                self.timers
                    .schedule(triggered_at + self.group.timing.delay_for(index), index);
                self.phase = SequencePhase::Running { triggered_at };
            }
            _ => {}
        }
        index
    }

    /// Start the sequence at `now_ms`. Does nothing unless still waiting.
    pub fn trigger(&mut self, now_ms: f64) {
        if self.phase != SequencePhase::Waiting {
            return;
        }
        debug!("reveal: triggered {} children at {now_ms:.0}ms", self.group.len());
        for (index, delay) in self.group.schedule().into_iter().enumerate() {
            self.timers.schedule(now_ms + delay, index);
        }
        self.phase = SequencePhase::Running {
            triggered_at: now_ms,
        };
    }

    /// Feed the container's geometry for this frame and fire due activations.
    /// Returns the indices that became active, in child order.
    pub fn observe(
        &mut self,
        container: Option<BoundingBox>,
        viewport_height: f64,
        now_ms: f64,
    ) -> Vec<usize> {
        if self.phase == SequencePhase::Waiting {
            let entered = self
                .observer
                .as_mut()
                .and_then(|o| o.sample(container, viewport_height))
                .is_some_and(|i| i.intersecting);
            if entered {
                if let Some(o) = self.observer.as_mut() {
                    o.teardown();
                }
                self.trigger(now_ms);
            }
        }
        self.tick(now_ms)
    }

    /// Fire activations due at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<usize> {
        let SequencePhase::Running { triggered_at } = self.phase else {
            return Vec::new();
        };
        let fired = self.timers.pop_due(now_ms);
        for i in &fired {
            self.active[*i] = true;
        }
        if self.timers.is_empty() {
            self.phase = SequencePhase::Complete { triggered_at };
        }
        fired
    }

    /// Cancel every pending activation and stop observing.
    pub fn teardown(&mut self) {
        if let Some(o) = self.observer.as_mut() {
            o.teardown();
        }
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!("reveal: cancelled {cancelled} pending activations");
        }
        self.phase = SequencePhase::Cancelled;
    }
}

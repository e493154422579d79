use log::debug;

use super::viewport::Intersection;

/// Interval of the counting loop, about one 60 Hz frame.
pub const DEFAULT_TICK_MS: f64 = 16.0;

/// Tick rounded to whole milliseconds, for timers that only take integers.
pub fn whole_tick_ms(tick_ms: f64) -> f64 {
    if tick_ms.is_finite() {
        tick_ms.round().max(1.0)
    } else {
        DEFAULT_TICK_MS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterState {
    pub current_value: f64,
    pub target_value: f64,
    pub started_at: Option<f64>,
}

/// Counts from 0 up to a target in equal fixed-size increments, one per tick.
///
/// Wall time may drift from the nominal duration when ticks arrive late; the
/// last value is always exactly the target.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    state: CounterState,
    increment: f64,
    tick_ms: f64,
    accumulator_ms: f64,
    phase: CounterPhase,
}

impl CounterAnimator {
    pub fn new(target_value: f64, duration_ms: f64) -> Self {
        Self::with_tick(target_value, duration_ms, DEFAULT_TICK_MS)
    }

    pub fn with_tick(target_value: f64, duration_ms: f64, tick_ms: f64) -> Self {
        let target_value = if target_value.is_finite() { target_value } else { 0.0 };
        let tick_ms = if tick_ms.is_finite() && tick_ms > 0.0 {
            tick_ms
        } else {
            DEFAULT_TICK_MS
        };
        // a zero or nonsense duration finishes on the first tick
        let ticks = if duration_ms.is_finite() && duration_ms > tick_ms {
            duration_ms / tick_ms
        } else {
            1.0
        };
        Self {
            state: CounterState {
                current_value: 0.0,
                target_value,
                started_at: None,
            },
            increment: target_value / ticks,
            tick_ms,
            accumulator_ms: 0.0,
            phase: CounterPhase::NotStarted,
        }
    }

    /// Every value a counter emits from trigger to completion.
    pub fn run(target_value: f64, duration_ms: f64) -> impl Iterator<Item = f64> {
        let mut counter = Self::new(target_value, duration_ms);
        counter.trigger(0.0);
        std::iter::from_fn(move || counter.step())
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn value(&self) -> f64 {
        self.state.current_value
    }

    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    pub fn is_running(&self) -> bool {
        self.phase == CounterPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CounterPhase::Completed
    }

    /// Start counting. Only the first call after construction or `reset` has
    /// any effect.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.phase != CounterPhase::NotStarted {
            return false;
        }
        self.state.started_at = Some(now_ms);
        self.phase = CounterPhase::Running;
        true
    }

    /// Start counting when the observed element reports entry.
    pub fn on_intersection(&mut self, intersection: &Intersection, now_ms: f64) -> bool {
        intersection.intersecting && self.trigger(now_ms)
    }

    /// One fixed increment. Returns the new value while running.
    pub fn step(&mut self) -> Option<f64> {
        if self.phase != CounterPhase::Running {
            return None;
        }
        let target = self.state.target_value;
        let next = self.state.current_value + self.increment;
        let reached = if self.increment >= 0.0 {
            next >= target
        } else {
            next <= target
        };
        if reached {
            self.state.current_value = target;
            self.phase = CounterPhase::Completed;
            debug!("counter: reached {target}");
        } else {
            self.state.current_value = next;
        }
        Some(self.state.current_value)
    }

    /// Consume `dt_ms` of frame time in whole ticks. Returns the latest value
    /// if at least one tick ran.
    pub fn advance(&mut self, dt_ms: f64) -> Option<f64> {
        if self.phase != CounterPhase::Running {
            return None;
        }
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.accumulator_ms += dt_ms;
        }
        let mut latest = None;
        while self.accumulator_ms >= self.tick_ms {
            self.accumulator_ms -= self.tick_ms;
            match self.step() {
                Some(v) => latest = Some(v),
                None => break,
            }
        }
        if !self.is_running() {
            self.accumulator_ms = 0.0;
        }
        latest
    }

    /// Back to zero and not started. A torn down counter stays torn down.
    pub fn reset(&mut self) {
        if self.phase == CounterPhase::Cancelled {
            return;
        }
        self.state.current_value = 0.0;
        self.state.started_at = None;
        self.accumulator_ms = 0.0;
        self.phase = CounterPhase::NotStarted;
    }

    pub fn teardown(&mut self) {
        self.phase = CounterPhase::Cancelled;
        self.accumulator_ms = 0.0;
    }

    /// The current value formatted like its target: whole targets show no
    /// decimals, fractional ones show one.
    pub fn display(&self, suffix: &str) -> String {
        format_count(self.state.current_value, self.state.target_value, suffix)
    }
}

pub fn format_count(value: f64, target: f64, suffix: &str) -> String {
    if target.fract() == 0.0 {
        format!("{value:.0}{suffix}")
    } else {
        format!("{value:.1}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ends_exactly_at_target() {
        let values = CounterAnimator::run(50.0, 2000.0).collect::<Vec<_>>();
        assert_eq!(*values.last().expect("values"), 50.0);
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
        assert!(values.iter().all(|v| *v <= 50.0));
        // 2000ms at 16ms per tick
        assert!((125..=126).contains(&values.len()));
    }

    #[test]
    fn test_fractional_and_awkward_targets() {
        for (target, duration) in [(4.5, 2000.0), (3.0, 2000.0), (0.1, 999.0), (1e6, 1234.5)] {
            let values = CounterAnimator::run(target, duration).collect::<Vec<_>>();
            assert_eq!(*values.last().expect("values"), target);
            assert!(values.iter().all(|v| *v <= target));
        }
    }

    #[test]
    fn test_negative_target_counts_down() {
        let values = CounterAnimator::run(-10.0, 160.0).collect::<Vec<_>>();
        assert_eq!(*values.last().expect("values"), -10.0);
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_degenerate_durations() {
        for duration in [0.0, -100.0, f64::NAN, 5.0] {
            let values = CounterAnimator::run(30.0, duration).collect::<Vec<_>>();
            assert_eq!(values, vec![30.0]);
        }
        assert_eq!(CounterAnimator::run(0.0, 2000.0).collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn test_triggers_once() {
        let mut counter = CounterAnimator::new(10.0, 160.0);
        assert_eq!(counter.step(), None);

        let miss = Intersection {
            intersecting: false,
            ratio: 0.0,
        };
        assert!(!counter.on_intersection(&miss, 0.0));
        assert_eq!(counter.phase(), CounterPhase::NotStarted);

        let hit = Intersection {
            intersecting: true,
            ratio: 1.0,
        };
        assert!(counter.on_intersection(&hit, 100.0));
        assert!(!counter.on_intersection(&hit, 200.0));
        assert_eq!(counter.state().started_at, Some(100.0));

        while counter.step().is_some() {}
        assert!(counter.is_complete());
        assert!(!counter.trigger(300.0));
        assert_eq!(counter.value(), 10.0);

        counter.reset();
        assert_eq!(counter.value(), 0.0);
        assert!(counter.trigger(400.0));
    }

    #[test]
    fn test_advance_uses_whole_ticks() {
        let mut counter = CounterAnimator::new(100.0, 1600.0);
        counter.trigger(0.0);
        assert_eq!(counter.advance(10.0), None);
        assert_eq!(counter.advance(10.0), Some(1.0));
        assert_eq!(counter.advance(48.0), Some(4.0));
        assert_eq!(counter.advance(1e9), Some(100.0));
        assert!(counter.is_complete());
        assert_eq!(counter.advance(16.0), None);
    }

    #[test]
    fn test_whole_tick_rounds_to_the_nearest_ms() {
        assert_eq!(whole_tick_ms(16.7), 17.0);
        assert_eq!(whole_tick_ms(16.4), 16.0);
        assert_eq!(whole_tick_ms(0.2), 1.0);
        assert_eq!(whole_tick_ms(-5.0), 1.0);
        assert_eq!(whole_tick_ms(f64::NAN), DEFAULT_TICK_MS);

        // the animator steps at the same rate the interval fires
        let tick = whole_tick_ms(16.7);
        let counter = CounterAnimator::with_tick(100.0, 1000.0, tick);
        assert_eq!(counter.tick_ms(), 17.0);
        assert_eq!(tick as u64, 17);
    }

    #[test]
    fn test_teardown_stops_counting() {
        let mut counter = CounterAnimator::new(50.0, 2000.0);
        counter.trigger(0.0);
        counter.advance(160.0);
        counter.teardown();
        let frozen = counter.state();
        for _ in 0..50 {
            assert_eq!(counter.advance(16.0), None);
            assert_eq!(counter.step(), None);
        }
        counter.reset();
        assert!(!counter.trigger(0.0));
        assert_eq!(counter.state(), frozen);
    }

    #[test]
    fn test_display() {
        assert_eq!(format_count(4.5, 4.5, "+"), "4.5+");
        assert_eq!(format_count(2.34, 4.5, "+"), "2.3+");
        assert_eq!(format_count(29.6, 30.0, "%"), "30%");
        assert_eq!(format_count(3.0, 3.0, ""), "3");
        let mut counter = CounterAnimator::new(50.0, 2000.0);
        counter.trigger(0.0);
        counter.step();
        assert_eq!(counter.display("%"), "0%");
    }
}

//! Damped-spring smoothing for scroll and pointer driven values.
//!
//! The spring is solved in closed form for every step rather than integrated
//! numerically, so the result does not depend on how a frame's `dt` is split
//! and critically or over-damped springs cannot overshoot their target.

use log::trace;
use serde::{Deserialize, Serialize};

/// Longest step a single `advance` will simulate. Frames after a long pause
/// (background tab, debugger) are treated as one long frame.
pub const MAX_STEP_MS: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from the target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::SMOOTH
    }
}

impl SpringConfig {
    /// Over-damped. Progress bars and the experience timeline.
    pub const SMOOTH: SpringConfig = SpringConfig {
        stiffness: 100.0,
        damping: 30.0,
        mass: 1.0,
        rest_delta: 0.001,
        rest_speed: 0.01,
    };

    /// Under-damped, overshoots a little. Entrance reveals.
    pub const BOUNCY: SpringConfig = SpringConfig {
        stiffness: 100.0,
        damping: 12.0,
        mass: 1.0,
        rest_delta: 0.001,
        rest_speed: 0.01,
    };

    /// A spring of unit mass with exactly critical damping.
    pub fn critical(stiffness: f64) -> Self {
        Self::with_damping_ratio(stiffness, 1.0)
    }

    pub fn with_damping_ratio(stiffness: f64, ratio: f64) -> Self {
        let mut config = Self {
            stiffness,
            ..Self::SMOOTH
        }
        .sanitized();
        config.damping = 2.0 * ratio.max(0.0) * (config.stiffness * config.mass).sqrt();
        config
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; 1.0 is critical.
    pub fn damping_ratio(&self) -> f64 {
        let c = self.sanitized();
        c.damping / (2.0 * (c.stiffness * c.mass).sqrt())
    }

    fn sanitized(self) -> Self {
        let positive_or = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            stiffness: positive_or(self.stiffness, Self::SMOOTH.stiffness),
            damping: if self.damping.is_finite() {
                self.damping.max(0.0)
            } else {
                Self::SMOOTH.damping
            },
            mass: positive_or(self.mass, 1.0),
            rest_delta: positive_or(self.rest_delta, Self::SMOOTH.rest_delta),
            rest_speed: positive_or(self.rest_speed, Self::SMOOTH.rest_speed),
        }
    }

    /// Displacement and velocity after `t` seconds, starting from displacement
    /// `x0` (current - target) and velocity `v0`.
    fn solve(&self, x0: f64, v0: f64, t: f64) -> (f64, f64) {
        let omega = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());

        if (zeta - 1.0).abs() < 1e-9 {
            let b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            ((x0 + b * t) * decay, (v0 - omega * b * t) * decay)
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            let a = x0;
            let b = (v0 + zeta * omega * x0) / omega_d;
            let (sin, cos) = (omega_d * t).sin_cos();
            let x = decay * (a * cos + b * sin);
            let v = -zeta * omega * x + decay * omega_d * (b * cos - a * sin);
            (x, v)
        } else {
            let s = omega * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega + s;
            let r2 = -zeta * omega - s;
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }
}

/// State owned by one smoother.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedValue {
    pub current: f64,
    pub velocity: f64,
    pub target: f64,
}

#[derive(Debug, Clone)]
pub struct SpringSmoother {
    config: SpringConfig,
    value: SmoothedValue,
    at_rest: bool,
    connected: bool,
}

impl SpringSmoother {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            config: config.sanitized(),
            value: SmoothedValue {
                current: initial,
                velocity: 0.0,
                target: initial,
            },
            at_rest: true,
            connected: true,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn state(&self) -> SmoothedValue {
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value.current
    }

    pub fn target(&self) -> f64 {
        self.value.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target without advancing time. Non-finite input is ignored.
    pub fn set_target(&mut self, raw_input: f64) {
        if !self.connected || !raw_input.is_finite() {
            return;
        }
        if raw_input != self.value.target {
            self.value.target = raw_input;
            self.at_rest = false;
        }
    }

    /// Snap to `value` with no motion.
    pub fn jump(&mut self, value: f64) {
        if !self.connected || !value.is_finite() {
            return;
        }
        self.value = SmoothedValue {
            current: value,
            velocity: 0.0,
            target: value,
        };
        self.at_rest = true;
    }

    /// Move toward `raw_input` by `dt_ms` milliseconds and return the new
    /// smoothed output.
    pub fn advance(&mut self, raw_input: f64, dt_ms: f64) -> f64 {
        self.set_target(raw_input);
        self.step(dt_ms)
    }

    /// Advance toward the current target.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        if !self.connected || self.at_rest {
            return self.value.current;
        }
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_STEP_MS)
        } else {
            0.0
        };
        if dt_ms == 0.0 {
            return self.value.current;
        }

        let x0 = self.value.current - self.value.target;
        let (x, v) = self.config.solve(x0, self.value.velocity, dt_ms / 1000.0);
        self.value.current = self.value.target + x;
        self.value.velocity = v;

        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            trace!("spring: settled at {}", self.value.target);
            self.value.current = self.value.target;
            self.value.velocity = 0.0;
            self.at_rest = true;
        }
        self.value.current
    }

    pub fn teardown(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 16.0;

    // Run a 0 -> 1 step response; returns every output
    fn step_response(config: SpringConfig, ticks: usize, dt_ms: f64) -> Vec<f64> {
        let mut spring = SpringSmoother::new(config, 0.0);
        (0..ticks).map(|_| spring.advance(1.0, dt_ms)).collect()
    }

    #[test]
    fn test_damping_ratio() {
        assert!((SpringConfig::critical(100.0).damping_ratio() - 1.0).abs() < 1e-12);
        assert_eq!(SpringConfig::critical(100.0).damping, 20.0);
        assert!(SpringConfig::SMOOTH.damping_ratio() > 1.0);
        assert!(SpringConfig::BOUNCY.damping_ratio() < 1.0);
    }

    #[test]
    fn test_critical_converges_without_overshoot() {
        for stiffness in [50.0, 100.0, 300.0, 1000.0] {
            let outputs = step_response(SpringConfig::critical(stiffness), 200, FRAME_MS);
            assert!(outputs.iter().all(|v| *v <= 1.0), "overshoot at k={stiffness}");
            let settled = outputs
                .iter()
                .position(|v| (1.0 - v).abs() <= 0.01)
                .expect("should converge");
            assert!(settled < 100, "took {settled} ticks at k={stiffness}");
            assert!(outputs.windows(2).all(|w| w[1] >= w[0]));
        }
    }

    #[test]
    fn test_overdamped_never_overshoots() {
        let outputs = step_response(SpringConfig::SMOOTH, 300, FRAME_MS);
        assert!(outputs.iter().all(|v| *v <= 1.0));
        assert_eq!(*outputs.last().expect("outputs"), 1.0);
    }

    #[test]
    fn test_underdamped_overshoots_then_settles() {
        let outputs = step_response(SpringConfig::BOUNCY, 400, FRAME_MS);
        assert!(outputs.iter().any(|v| *v > 1.0), "bouncy preset should overshoot");
        let tail = &outputs[300..];
        assert!(tail.iter().all(|v| (1.0 - v).abs() <= 0.01));
    }

    #[test]
    fn test_step_size_independent() {
        let mut coarse = SpringSmoother::new(SpringConfig::BOUNCY, 0.0);
        let mut fine = SpringSmoother::new(SpringConfig::BOUNCY, 0.0);
        coarse.advance(1.0, 32.0);
        fine.advance(1.0, 16.0);
        fine.advance(1.0, 16.0);
        assert!((coarse.value() - fine.value()).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_dt_stays_stable() {
        let mut spring = SpringSmoother::new(SpringConfig::BOUNCY, 0.0);
        for dt in [1e9, f64::INFINITY, 1e-9, -50.0, f64::NAN, 1e12] {
            let v = spring.advance(1.0, dt);
            assert!(v.is_finite());
            assert!(v.abs() < 2.0);
        }
        // stiff spring with the longest allowed frame
        let outputs = step_response(SpringConfig::critical(1e6), 50, 1e6);
        assert!(outputs.iter().all(|v| v.is_finite() && *v <= 1.0));
        assert_eq!(*outputs.last().expect("outputs"), 1.0);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut spring = SpringSmoother::new(SpringConfig::SMOOTH, 0.5);
        assert_eq!(spring.advance(f64::NAN, FRAME_MS), 0.5);
        assert!(spring.is_at_rest());
        spring.set_target(f64::INFINITY);
        assert_eq!(spring.target(), 0.5);
    }

    #[test]
    fn test_rest_and_jump() {
        let mut spring = SpringSmoother::new(SpringConfig::SMOOTH, 0.0);
        assert!(spring.is_at_rest());
        spring.set_target(1.0);
        assert!(!spring.is_at_rest());
        spring.jump(0.25);
        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 0.25);
        assert_eq!(spring.advance(0.25, FRAME_MS), 0.25);
    }

    #[test]
    fn test_teardown_freezes_state() {
        let mut spring = SpringSmoother::new(SpringConfig::BOUNCY, 0.0);
        spring.advance(1.0, FRAME_MS);
        spring.teardown();
        let frozen = spring.state();
        for _ in 0..20 {
            spring.advance(5.0, FRAME_MS);
        }
        spring.jump(3.0);
        assert_eq!(spring.state(), frozen);
    }
}

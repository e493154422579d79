use serde::{Deserialize, Serialize};

use super::{
    progress::Anchor,
    reveal::StaggerTiming,
    spring::SpringConfig,
};

/// The single set of motion parameters every component reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Progress bar, timeline and parallax smoothing.
    pub smooth: SpringConfig,
    /// Entrance reveals.
    pub bouncy: SpringConfig,
    /// Pointer-driven tilt.
    pub pointer: SpringConfig,

    /// Visible fraction at which content reveals.
    pub reveal_threshold: f64,
    /// Viewport inset applied when revealing whole sections.
    pub section_margin: f64,
    /// Distance in px content rises while fading in.
    pub reveal_distance: f64,

    pub stagger: StaggerTiming,
    pub word_stagger: StaggerTiming,
    pub char_stagger: StaggerTiming,
    pub nav_stagger: StaggerTiming,

    pub counter_duration_ms: f64,
    pub counter_tick_ms: f64,
    pub loader_duration_ms: f64,

    pub timeline_start: Anchor,
    pub timeline_end: Anchor,
    pub parallax_start: Anchor,
    pub parallax_end: Anchor,

    pub navbar_offset: f64,
    pub scroll_to_top_offset: f64,
    /// Maximum tilt in degrees at the card edges.
    pub tilt_degrees: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smooth: SpringConfig::SMOOTH,
            bouncy: SpringConfig::BOUNCY,
            pointer: SpringConfig {
                stiffness: 300.0,
                damping: 30.0,
                ..SpringConfig::SMOOTH
            },
            reveal_threshold: 0.3,
            section_margin: 100.0,
            reveal_distance: 20.0,
            stagger: StaggerTiming::new(80.0, 100.0),
            word_stagger: StaggerTiming::new(80.0, 0.0),
            char_stagger: StaggerTiming::new(30.0, 0.0),
            nav_stagger: StaggerTiming::new(100.0, 0.0),
            counter_duration_ms: 2000.0,
            counter_tick_ms: 16.0,
            loader_duration_ms: 1500.0,
            timeline_start: Anchor::new(0.0, 0.5),
            timeline_end: Anchor::new(1.0, 0.8),
            parallax_start: Anchor::new(0.0, 1.0),
            parallax_end: Anchor::new(1.0, 0.0),
            navbar_offset: 20.0,
            scroll_to_top_offset: 400.0,
            tilt_degrees: 7.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: MotionConfig = serde_json::from_str(
            r#"{
                "reveal_threshold": 0.4,
                "stagger": { "stagger_ms": 50.0, "initial_delay_ms": 0.0 },
                "timeline_start": "top 60%",
                "bouncy": { "damping": 10.0 }
            }"#,
        )
        .expect("config should parse");

        assert_eq!(config.reveal_threshold, 0.4);
        assert_eq!(config.stagger, StaggerTiming::new(50.0, 0.0));
        assert_eq!(config.timeline_start, Anchor::new(0.0, 0.6));
        assert_eq!(config.bouncy.damping, 10.0);
        assert_eq!(config.bouncy.stiffness, SpringConfig::SMOOTH.stiffness);
        assert_eq!(config.timeline_end, MotionConfig::default().timeline_end);
        assert_eq!(config.counter_duration_ms, 2000.0);
    }

    #[test]
    fn test_bad_anchor_is_rejected() {
        let err = serde_json::from_str::<MotionConfig>(r#"{ "parallax_end": "sideways top" }"#)
            .expect_err("anchor should not parse");
        assert!(err.to_string().contains("Unknown anchor position"));
    }

    #[test]
    fn test_default_springs_keep_their_roles() {
        let config = MotionConfig::default();
        assert!(config.smooth.damping_ratio() >= 1.0);
        assert!(config.bouncy.damping_ratio() < 1.0);
        assert!(config.timeline_start.viewport < 1.0);
    }
}

use serde::{Deserialize, Serialize};

use super::interpolate::lerp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Hidden,
    Visible,
    /// Hover or focus emphasis on top of `Visible`.
    Active,
}

/// Target visual properties for one state. Translations are in px, rotations
/// in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTransform {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VisualTransform {
    pub const IDENTITY: VisualTransform = VisualTransform {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Blend toward `to`. `t` may leave `0..=1` when driven by a bouncy
    /// spring; geometry extrapolates but opacity stays in range.
    pub fn blend(&self, to: &VisualTransform, t: f64) -> VisualTransform {
        VisualTransform {
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            translate_x: lerp(self.translate_x, to.translate_x, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale: lerp(self.scale, to.scale, t).max(0.0),
            rotate_x: lerp(self.rotate_x, to.rotate_x, t),
            rotate_y: lerp(self.rotate_y, to.rotate_y, t),
        }
    }

    pub fn to_css(&self) -> String {
        let mut transform = format!(
            "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
            self.translate_x, self.translate_y, self.scale
        );
        if self.rotate_x != 0.0 || self.rotate_y != 0.0 {
            transform.push_str(&format!(
                " rotateX({:.2}deg) rotateY({:.2}deg)",
                self.rotate_x, self.rotate_y
            ));
        }
        format!("opacity: {:.3}; transform: {transform};", self.opacity)
    }
}

/// The three named states of an animated element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variants {
    pub hidden: VisualTransform,
    pub visible: VisualTransform,
    pub active: VisualTransform,
}

impl Variants {
    pub fn new(hidden: VisualTransform) -> Self {
        Self {
            hidden,
            visible: VisualTransform::IDENTITY,
            active: VisualTransform::IDENTITY,
        }
    }

    pub fn with_active(mut self, active: VisualTransform) -> Self {
        self.active = active;
        self
    }

    pub fn resolve(&self, state: VisualState) -> VisualTransform {
        match state {
            VisualState::Hidden => self.hidden,
            VisualState::Visible => self.visible,
            VisualState::Active => self.active,
        }
    }

    /// Between hidden (0.0) and visible (1.0).
    pub fn reveal_at(&self, progress: f64) -> VisualTransform {
        self.hidden.blend(&self.visible, progress)
    }

    /// Between visible (0.0) and active (1.0).
    pub fn emphasis_at(&self, progress: f64) -> VisualTransform {
        self.visible.blend(&self.active, progress)
    }

    /// Fade in while rising `distance` px.
    pub fn fade_up(distance: f64) -> Self {
        Self::new(VisualTransform {
            opacity: 0.0,
            translate_y: distance,
            ..VisualTransform::IDENTITY
        })
    }

    /// Fade in while sliding horizontally from `offset` px and rising slightly.
    pub fn slide_in(offset: f64) -> Self {
        Self::new(VisualTransform {
            opacity: 0.0,
            translate_x: offset,
            translate_y: 20.0,
            ..VisualTransform::IDENTITY
        })
    }

    /// Grow from nothing.
    pub fn pop() -> Self {
        Self::new(VisualTransform {
            opacity: 0.0,
            scale: 0.0,
            ..VisualTransform::IDENTITY
        })
    }

    /// Card that lifts when hovered.
    pub fn card(offset: f64) -> Self {
        Self::slide_in(offset).with_active(VisualTransform {
            translate_y: -12.0,
            scale: 1.01,
            ..VisualTransform::IDENTITY
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_named_states() {
        let v = Variants::card(-50.0);
        assert_eq!(v.resolve(VisualState::Hidden).translate_x, -50.0);
        assert_eq!(v.resolve(VisualState::Hidden).opacity, 0.0);
        assert_eq!(v.resolve(VisualState::Visible), VisualTransform::IDENTITY);
        assert_eq!(v.resolve(VisualState::Active).translate_y, -12.0);
        assert_eq!(Variants::pop().resolve(VisualState::Active), VisualTransform::IDENTITY);
    }

    #[test]
    fn test_reveal_blend() {
        let v = Variants::fade_up(20.0);
        assert_eq!(v.reveal_at(0.0), v.hidden);
        assert_eq!(v.reveal_at(1.0), v.visible);
        let half = v.reveal_at(0.5);
        assert_eq!(half.opacity, 0.5);
        assert_eq!(half.translate_y, 10.0);
        // spring overshoot moves past the target but keeps opacity valid
        let over = v.reveal_at(1.1);
        assert_eq!(over.opacity, 1.0);
        assert!(over.translate_y < 0.0);
    }

    #[test]
    fn test_css() {
        let css = Variants::fade_up(20.0).reveal_at(0.0).to_css();
        assert_eq!(
            css,
            "opacity: 0.000; transform: translate3d(0.00px, 20.00px, 0) scale(1.0000);"
        );
        let tilted = VisualTransform {
            rotate_x: 7.5,
            ..VisualTransform::IDENTITY
        };
        assert!(tilted.to_css().contains("rotateX(7.50deg) rotateY(0.00deg)"));
    }

    #[test]
    fn test_deserialize_partial_transform() {
        let t: VisualTransform =
            serde_json::from_str(r#"{"opacity": 0.0, "translate_y": 30.0}"#).expect("should parse");
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate_y, 30.0);
        assert_eq!(t.opacity, 0.0);
    }
}

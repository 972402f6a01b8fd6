//! Keyframe tracks attached to layout elements and their sampling at a point in time.

use crate::foundation::core::Vec2;
use crate::layout::document::Slot;

/// Timing function mapping linear progress to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// CSS `ease`.
    pub const CSS_EASE: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Apply the timing function to normalized progress `t`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Solve bx(u) = x for u, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson, then fixed bisection refinement.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..8 {
        if sample_curve(x1, x2, t) < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

/// Which end state an element shows outside its active interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FillMode {
    /// Holds the last keyframe after the end; the element's own style applies before the start.
    Forwards,
    /// Holds the first keyframe during the delay and the last after the end.
    Both,
}

/// Animatable properties at one keyframe.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub opacity: f32,
    /// Vertical offset in CSS pixels, positive is downwards.
    pub translate_y: f64,
}

/// Two-key animation on one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTrack {
    pub target: Slot,
    pub from: Keyframe,
    pub to: Keyframe,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub ease: Ease,
    pub fill: FillMode,
}

impl AnimationTrack {
    pub const FADE_UP_DURATION_MS: u32 = 4000;

    /// The `fadeUp` entrance: opacity 0 to 1 while rising `rise_px` into place.
    pub fn fade_up(target: Slot, rise_px: f64, delay_ms: u32) -> Self {
        Self {
            target,
            from: Keyframe {
                opacity: 0.0,
                translate_y: rise_px,
            },
            to: Keyframe {
                opacity: 1.0,
                translate_y: 0.0,
            },
            delay_ms,
            duration_ms: Self::FADE_UP_DURATION_MS,
            ease: Ease::CSS_EASE,
            fill: if delay_ms > 0 {
                FillMode::Both
            } else {
                FillMode::Forwards
            },
        }
    }

    /// Evaluate the track at `t_ms`; `None` means the track does not affect the element.
    pub fn sample(&self, t_ms: f64) -> Option<Keyframe> {
        let local = t_ms - f64::from(self.delay_ms);
        if local < 0.0 {
            return match self.fill {
                FillMode::Both => Some(self.from),
                FillMode::Forwards => None,
            };
        }
        let duration = f64::from(self.duration_ms);
        let progress = if duration <= 0.0 {
            1.0
        } else {
            (local / duration).min(1.0)
        };
        let e = self.ease.apply(progress);
        Some(Keyframe {
            opacity: lerp(f64::from(self.from.opacity), f64::from(self.to.opacity), e) as f32,
            translate_y: lerp(self.from.translate_y, self.to.translate_y, e),
        })
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Resolved appearance of one element at a sampled time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementPose {
    pub opacity: f32,
    pub offset: Vec2,
}

impl ElementPose {
    pub(crate) fn resting(opacity: f32) -> Self {
        Self {
            opacity,
            offset: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anim.rs"]
mod tests;

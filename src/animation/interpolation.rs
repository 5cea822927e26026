use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Easing functions for camera transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingFunction {
    /// Constant rate; the spin transitions use this so consecutive ticks join seamlessly
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInOutSine,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInOutSine => -(((PI * t).cos() - 1.0) / 2.0),
        }
    }
}

/// Linear mapping of an input band onto an output band
///
/// The output band may run backwards (`out_min > out_max`), which is how the
/// shrinking scale and the equator-first stacking order are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeMap {
    pub in_min: f64,
    pub in_max: f64,
    pub out_min: f64,
    pub out_max: f64,
}

impl RangeMap {
    pub const fn new(input: (f64, f64), output: (f64, f64)) -> Self {
        Self {
            in_min: input.0,
            in_max: input.1,
            out_min: output.0,
            out_max: output.1,
        }
    }

    /// Map `value`; with `clamp` the result never leaves the output band
    pub fn map(&self, value: f64, clamp: bool) -> f64 {
        let t = (value - self.in_min) / (self.in_max - self.in_min);
        let out = self.out_min + (self.out_max - self.out_min) * t;

        if clamp {
            let (lo, hi) = self.output_bounds();
            out.clamp(lo, hi)
        } else {
            out
        }
    }

    /// Output band as `(low, high)` regardless of direction
    pub fn output_bounds(&self) -> (f64, f64) {
        (self.out_min.min(self.out_max), self.out_min.max(self.out_max))
    }

    /// An input band of zero width cannot be mapped
    pub fn is_degenerate(&self) -> bool {
        !(self.in_max - self.in_min).is_normal()
    }
}

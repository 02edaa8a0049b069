//! Easing curves for camera transitions.
//!
//! Every curve maps normalized time in `[0, 1]` to normalized progress in
//! `[0, 1]`, with `f(0) = 0` and `f(1) = 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a transition's normalized time.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out (slow at both ends).
    QuadraticInOut,
    /// Cubic ease-in-out (smoother acceleration than quadratic).
    CubicInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default camera easing: fast departure, gentle arrival.
    pub const DEFAULT: EasingFunction = EasingFunction::QuadraticOut;

    /// Evaluate the curve at `t`. Input is clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::QuadraticInOut,
        EasingFunction::CubicInOut,
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 },
    ];

    #[test]
    fn endpoints_are_fixed() {
        for f in ALL {
            assert!(f.evaluate(0.0).abs() < 1e-6, "{f:?} at 0");
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6, "{f:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for f in ALL {
            assert!(f.evaluate(-0.5).abs() < 1e-6);
            assert!((f.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn quadratic_out_front_loads_progress() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.5), 0.75);
        assert!(quad_out.evaluate(0.25) > 0.25);
    }

    #[test]
    fn in_out_curves_are_symmetric() {
        for f in [EasingFunction::QuadraticInOut, EasingFunction::CubicInOut]
        {
            assert!((f.evaluate(0.5) - 0.5).abs() < 1e-6);
            let a = f.evaluate(0.2);
            let b = f.evaluate(0.8);
            assert!((a + b - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for f in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = f.evaluate(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{f:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn default_is_quadratic_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticOut);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&EasingFunction::CubicInOut).unwrap();
        assert_eq!(json, "\"cubic_in_out\"");
    }
}

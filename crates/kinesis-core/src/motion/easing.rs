//! Pure easing functions for tweened entrances
//!
//! Provides mathematical easing functions that map input [0, 1] to output [0, 1]
//! with various acceleration curves.

use serde::{Deserialize, Serialize};

/// Easing curve for duration-based animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end when complete
    None,
    Linear,
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// cubic-bezier(0.16, 1, 0.3, 1): fast start, long soft landing
    #[default]
    Smooth,
    /// cubic-bezier(0.76, 0, 0.24, 1): curtain-style wipe
    InOut,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::Smooth => CubicBezier::new(0.16, 1.0, 0.3, 1.0).solve(t),
            EasingType::InOut => CubicBezier::new(0.76, 0.0, 0.24, 1.0).solve(t),
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// CSS-style cubic bezier with fixed end points (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-7;

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    #[inline]
    fn slope(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Curve parameter whose x equals `x`
    fn parameter_for(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let error = Self::sample(self.x1, self.x2, s) - x;
            if error.abs() < Self::EPSILON {
                return s;
            }
            let slope = Self::slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        // Newton stalled on a flat section: bisect
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        while hi - lo > Self::EPSILON {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    pub fn solve(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.parameter_for(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 7] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::Smooth,
        EasingType::InOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            // t=0 should give 0 (None jumps at the end)
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            // t=1 should give 1
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL.into_iter().filter(|e| *e != EasingType::None) {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev - 1e-9, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_bezier_linear_matches_identity() {
        let linear = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((linear.solve(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_smooth_front_loads_motion() {
        assert!(EasingType::Smooth.apply(0.3) > 0.8);
        let mid = EasingType::InOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingType,
        }
        let parsed: Wrapper = toml::from_str("easing = \"in_out\"").unwrap();
        assert_eq!(parsed.easing, EasingType::InOut);
    }
}

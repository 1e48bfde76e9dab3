//! Time calculation utilities shared by time-sliced components
//!
//! Provides pure functions for progress and interpolation, plus [`Interval`]
//! which turns variable frame deltas into a whole number of fixed-rate ticks.

/// Progress (0.0 to 1.0) of `elapsed_ms` through `duration_ms`
///
/// A zero or negative duration is complete immediately.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 || !duration_ms.is_finite() {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Per-frame interpolation factor `k` re-derived for an arbitrary delta
///
/// `k` is tuned for frames of `reference_ms`; the returned factor covers the
/// same fraction of remaining distance per unit of wall time.
#[inline]
pub fn frame_rate_independent_factor(k: f64, delta_ms: f64, reference_ms: f64) -> f64 {
    if delta_ms <= 0.0 || reference_ms <= 0.0 {
        return 0.0;
    }
    let k = k.clamp(0.0, 1.0);
    1.0 - (1.0 - k).powf(delta_ms / reference_ms)
}

/// Fixed-period tick source driven by frame deltas
///
/// Remainders carry over between frames so the long-run tick rate is exact
/// regardless of frame timing.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period_ms: f64,
    carry_ms: f64,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            carry_ms: 0.0,
        }
    }

    /// Interval firing `rate` times per second
    pub fn per_second(rate: f64) -> Self {
        Self::new(if rate > 0.0 { 1000.0 / rate } else { 0.0 })
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance by `delta_ms` and return how many ticks elapsed
    ///
    /// Non-finite or negative deltas and a non-positive period yield no ticks.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        if !delta_ms.is_finite() || delta_ms <= 0.0 || !(self.period_ms > 0.0) {
            return 0;
        }
        self.carry_ms += delta_ms;
        // Tolerance keeps 1000/60 * 60 from landing a hair below a whole tick
        let ticks = ((self.carry_ms / self.period_ms) + 1e-9).floor();
        self.carry_ms = (self.carry_ms - ticks * self.period_ms).max(0.0);
        ticks.min(u32::MAX as f64) as u32
    }

    /// Drop any carried remainder
    pub fn reset(&mut self) {
        self.carry_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(0.0, 0.0) - 1.0).abs() < 0.001);
        assert!((progress(50.0, 200.0) - 0.25).abs() < 0.001);
        assert_eq!(progress(500.0, 200.0), 1.0);
    }

    #[test]
    fn test_factor_matches_reference_frame() {
        let k = frame_rate_independent_factor(0.07, 1000.0 / 60.0, 1000.0 / 60.0);
        assert!((k - 0.07).abs() < 1e-12);
        // Two half frames cover the same distance as one full frame
        let half = frame_rate_independent_factor(0.07, 1000.0 / 120.0, 1000.0 / 60.0);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((remaining - 0.93).abs() < 1e-12);
        assert_eq!(frame_rate_independent_factor(0.07, 0.0, 16.0), 0.0);
    }

    #[test]
    fn test_interval_carries_remainder() {
        let mut interval = Interval::new(30.0);
        assert_eq!(interval.advance(16.0), 0);
        assert_eq!(interval.advance(16.0), 1);
        assert_eq!(interval.advance(100.0), 3);
        interval.reset();
        assert_eq!(interval.advance(29.0), 0);
    }

    #[test]
    fn test_interval_sixty_per_second_is_exact() {
        let mut interval = Interval::per_second(60.0);
        let mut ticks = 0;
        for _ in 0..125 {
            ticks += interval.advance(16.0);
        }
        assert_eq!(ticks, 120);
        assert_eq!(Interval::per_second(60.0).advance(2000.0), 120);
    }

    #[test]
    fn test_interval_rejects_bad_input() {
        let mut interval = Interval::new(30.0);
        assert_eq!(interval.advance(f64::NAN), 0);
        assert_eq!(interval.advance(-5.0), 0);
        assert_eq!(Interval::new(0.0).advance(100.0), 0);
        assert_eq!(Interval::per_second(0.0).advance(100.0), 0);
    }
}

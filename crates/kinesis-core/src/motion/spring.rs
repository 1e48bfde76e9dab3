//! Spring-damper integration
//!
//! Semi-implicit (symplectic) Euler: acceleration is computed from the current
//! state, velocity is updated first and the *new* velocity moves the position.
//! Frame deltas are clamped and split into short sub-steps so the integration
//! stays stable for stiffness up to 1000 and damping up to 50 no matter how
//! long the host paused between frames.

use serde::Serialize;
use tracing::{trace, warn};

use super::value::MotionValue;
use crate::clock::{ClockTick, FrameDriven};
use crate::config::{ClockConfig, SpringConfig};
use crate::{Error, Result};

/// Spring coefficients, fixed for the duration of one animation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringParams {
    stiffness: f64,
    damping: f64,
}

impl SpringParams {
    /// Cursor indicator following the pointer
    pub const CURSOR: Self = Self::new_unchecked(500.0, 35.0);
    /// Magnetic wrapper tracking the pointer
    pub const MAGNETIC_TRACK: Self = Self::new_unchecked(600.0, 40.0);
    /// Magnetic wrapper returning to rest
    pub const MAGNETIC_SNAP: Self = Self::new_unchecked(300.0, 20.0);
    /// Scroll progress bar
    pub const PROGRESS_BAR: Self = Self::new_unchecked(100.0, 30.0);
    /// Hover nudge on small affordances such as arrows
    pub const ARROW_HOVER: Self = Self::new_unchecked(400.0, 10.0);

    const fn new_unchecked(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }

    pub fn new(stiffness: f64, damping: f64) -> Result<Self> {
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "spring stiffness must be positive, got {stiffness}"
            )));
        }
        if !(damping.is_finite() && damping > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "spring damping must be positive, got {damping}"
            )));
        }
        Ok(Self { stiffness, damping })
    }

    #[inline]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

/// Bounds applied to a frame delta before integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLimits {
    pub max_delta_ms: f64,
    pub substep_ms: f64,
}

impl Default for StepLimits {
    fn default() -> Self {
        Self {
            max_delta_ms: 1000.0,
            substep_ms: 8.0,
        }
    }
}

impl From<&ClockConfig> for StepLimits {
    fn from(config: &ClockConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_delta_ms: if config.max_frame_delta_ms > 0.0 {
                config.max_frame_delta_ms
            } else {
                defaults.max_delta_ms
            },
            substep_ms: if config.spring_substep_ms > 0.0 {
                config.spring_substep_ms
            } else {
                defaults.substep_ms
            },
        }
    }
}

/// One semi-implicit Euler step of `dt_secs`
#[inline]
fn euler_step(state: &mut MotionValue, params: &SpringParams, dt_secs: f64) {
    let acceleration =
        params.stiffness * (state.target - state.value) - params.damping * state.velocity;
    state.velocity += acceleration * dt_secs;
    state.value += state.velocity * dt_secs;
}

/// Advance `state` by `delta_ms` with default step limits
pub fn advance(state: MotionValue, params: &SpringParams, delta_ms: f64) -> MotionValue {
    advance_with(state, params, delta_ms, &StepLimits::default())
}

/// Advance `state` by `delta_ms`
///
/// Non-finite input, or a step that would produce a non-finite result, leaves
/// the state untouched for this frame.
pub fn advance_with(
    state: MotionValue,
    params: &SpringParams,
    delta_ms: f64,
    limits: &StepLimits,
) -> MotionValue {
    if !delta_ms.is_finite() || delta_ms <= 0.0 || !state.is_finite() {
        if !state.is_finite() || !delta_ms.is_finite() {
            warn!(?state, delta_ms, "Skipping spring step with non-finite input");
        }
        return state;
    }

    let delta_ms = delta_ms.min(limits.max_delta_ms);
    let substeps = (delta_ms / limits.substep_ms).ceil().max(1.0);
    let dt_secs = delta_ms / substeps / 1000.0;

    let mut next = state;
    for _ in 0..substeps as u32 {
        euler_step(&mut next, params, dt_secs);
    }

    if next.is_finite() {
        next
    } else {
        warn!(?state, "Spring step diverged, keeping previous state");
        state
    }
}

/// A [`MotionValue`] paired with the spring that drives it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpringValue {
    motion: MotionValue,
    params: SpringParams,
    rest_delta: f64,
    rest_speed: f64,
    #[serde(skip)]
    limits: StepLimits,
}

impl SpringValue {
    pub fn new(initial: f64, params: SpringParams) -> Self {
        Self {
            motion: MotionValue::new(initial),
            params,
            rest_delta: 0.01,
            rest_speed: 0.01,
            limits: StepLimits::default(),
        }
    }

    /// Build from config, falling back to `fallback` when the configured
    /// coefficients are invalid
    pub fn from_config(initial: f64, config: &SpringConfig, fallback: SpringParams) -> Self {
        let params = config.params().unwrap_or_else(|e| {
            warn!(error = %e, "Invalid spring config, using fallback");
            fallback
        });
        Self::new(initial, params).with_rest(config.rest_delta, config.rest_speed)
    }

    pub fn with_rest(mut self, rest_delta: f64, rest_speed: f64) -> Self {
        self.rest_delta = rest_delta.max(0.0);
        self.rest_speed = rest_speed.max(0.0);
        self
    }

    pub fn with_limits(mut self, limits: StepLimits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.motion.value
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.motion.target
    }

    pub fn motion(&self) -> MotionValue {
        self.motion
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// Redirect toward `target` without resetting velocity
    pub fn set_target(&mut self, target: f64) {
        self.motion.set_target(target);
    }

    /// Redirect toward `target` using different coefficients from now on
    pub fn animate_to(&mut self, target: f64, params: SpringParams) {
        self.params = params;
        self.motion.set_target(target);
    }

    /// Place the value without animation
    pub fn jump(&mut self, value: f64) {
        self.motion.set(value);
    }

    pub fn is_settled(&self) -> bool {
        (self.motion.target - self.motion.value).abs() <= self.rest_delta
            && self.motion.velocity.abs() <= self.rest_speed
    }

    pub fn update(&mut self, delta_ms: f64) -> f64 {
        if self.is_settled() {
            if self.motion.value != self.motion.target {
                self.motion = MotionValue::new(self.motion.target);
            }
            return self.motion.value;
        }
        self.motion = advance_with(self.motion, &self.params, delta_ms, &self.limits);
        if self.is_settled() {
            trace!(target = self.motion.target, "Spring settled");
            self.motion = MotionValue::new(self.motion.target);
        }
        self.motion.value
    }
}

impl FrameDriven for SpringValue {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: MotionValue, params: &SpringParams, frames: usize, dt: f64) -> MotionValue {
        (0..frames).fold(state, |s, _| advance(s, params, dt))
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(SpringParams::new(0.0, 10.0).is_err());
        assert!(SpringParams::new(100.0, -1.0).is_err());
        assert!(SpringParams::new(f64::NAN, 10.0).is_err());
        assert!(SpringParams::new(300.0, 20.0).is_ok());
    }

    #[test]
    fn test_velocity_updates_before_position() {
        let mut state = MotionValue::new(0.0);
        state.set_target(1.0);
        let next = advance(state, &SpringParams::MAGNETIC_SNAP, 8.0);
        // a = 300, v = 300 * 0.008 = 2.4, x = 2.4 * 0.008
        assert!((next.velocity - 2.4).abs() < 1e-9);
        assert!((next.value - 0.0192).abs() < 1e-9);
    }

    #[test]
    fn test_converges_for_snap_params() {
        let mut state = MotionValue::new(0.0);
        state.set_target(100.0);
        let state = run(state, &SpringParams::MAGNETIC_SNAP, 180, 1000.0 / 60.0);
        assert!((state.value - 100.0).abs() < 1e-3, "value {}", state.value);
        assert!(state.velocity.abs() < 1e-2);
    }

    #[test]
    fn test_error_envelope_shrinks() {
        let mut state = MotionValue::new(0.0);
        state.set_target(1.0);
        let params = SpringParams::MAGNETIC_SNAP;
        let mut peak_per_window = Vec::new();
        for _ in 0..6 {
            let mut peak: f64 = 0.0;
            for _ in 0..20 {
                state = advance(state, &params, 16.0);
                peak = peak.max((state.value - 1.0).abs());
            }
            peak_per_window.push(peak);
        }
        for pair in peak_per_window.windows(2).skip(1) {
            assert!(pair[1] <= pair[0], "{:?}", peak_per_window);
        }
    }

    #[test]
    fn test_large_delta_is_stable() {
        let params = SpringParams::new(1000.0, 50.0).unwrap();
        let mut state = MotionValue::new(0.0);
        state.set_target(1.0);
        let state = advance(state, &params, 60_000.0);
        assert!(state.is_finite());
        assert!((state.value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_stiff_params_stable_at_long_frames() {
        let params = SpringParams::new(1000.0, 50.0).unwrap();
        let mut state = MotionValue::new(0.0);
        state.set_target(50.0);
        let state = run(state, &params, 40, 50.0);
        assert!((state.value - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_delta_is_noop() {
        let mut state = MotionValue::new(0.0);
        state.set_target(1.0);
        assert_eq!(advance(state, &SpringParams::CURSOR, f64::NAN), state);
        assert_eq!(advance(state, &SpringParams::CURSOR, f64::INFINITY), state);
        assert_eq!(advance(state, &SpringParams::CURSOR, 0.0), state);
    }

    #[test]
    fn test_non_finite_state_does_not_propagate() {
        let state = MotionValue {
            value: 0.0,
            velocity: 0.0,
            target: f64::NAN,
        };
        assert!(advance(state, &SpringParams::CURSOR, 16.0).value == 0.0);
    }

    #[test]
    fn test_redirect_keeps_momentum() {
        let mut spring = SpringValue::new(0.0, SpringParams::CURSOR);
        spring.set_target(100.0);
        spring.update(16.0);
        let velocity = spring.motion().velocity;
        assert!(velocity > 0.0);
        spring.set_target(-100.0);
        assert_eq!(spring.motion().velocity, velocity);
        let before = spring.get();
        spring.update(1.0);
        // Still moving forward for a moment: no snap
        assert!(spring.get() > before);
    }

    #[test]
    fn test_spring_value_settles_exactly() {
        let mut spring = SpringValue::new(0.0, SpringParams::PROGRESS_BAR).with_rest(0.001, 0.01);
        spring.set_target(1.0);
        for _ in 0..600 {
            spring.update(16.0);
        }
        assert!(spring.is_settled());
        assert_eq!(spring.get(), 1.0);
    }

    #[test]
    fn test_animate_to_swaps_params() {
        let mut spring = SpringValue::new(10.0, SpringParams::MAGNETIC_TRACK);
        spring.animate_to(0.0, SpringParams::MAGNETIC_SNAP);
        assert_eq!(spring.params(), SpringParams::MAGNETIC_SNAP);
        assert_eq!(spring.target(), 0.0);
    }

    #[test]
    fn test_from_config_falls_back() {
        let config = SpringConfig::new(-1.0, 10.0);
        let spring = SpringValue::from_config(0.0, &config, SpringParams::CURSOR);
        assert_eq!(spring.params(), SpringParams::CURSOR);
    }
}

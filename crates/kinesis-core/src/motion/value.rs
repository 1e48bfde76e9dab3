use serde::Serialize;
use tracing::warn;

/// A continuously animated scalar
///
/// Written by exactly one owner: either a spring through
/// [`crate::motion::advance`] or a direct [`MotionValue::set`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MotionValue {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
}

impl MotionValue {
    /// A value at rest
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Snap to `value` and stop
    ///
    /// Meant for initial placement before a spring drives the value; later
    /// calls produce a visible jump.
    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            warn!(value, "Ignoring non-finite motion value");
            return;
        }
        *self = Self::new(value);
    }

    /// Redirect toward `target`, keeping the current velocity
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            warn!(target, "Ignoring non-finite motion target");
            return;
        }
        self.target = target;
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.velocity.is_finite() && self.target.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_resets_velocity_and_target() {
        let mut value = MotionValue {
            value: 3.0,
            velocity: 12.0,
            target: 8.0,
        };
        value.set(5.0);
        assert_eq!(value, MotionValue::new(5.0));
    }

    #[test]
    fn test_set_target_keeps_velocity() {
        let mut value = MotionValue {
            value: 3.0,
            velocity: 12.0,
            target: 8.0,
        };
        value.set_target(-1.0);
        assert_eq!(value.velocity, 12.0);
        assert_eq!(value.target, -1.0);
    }

    #[test]
    fn test_non_finite_writes_are_ignored() {
        let mut value = MotionValue::new(1.0);
        value.set(f64::NAN);
        value.set_target(f64::INFINITY);
        assert_eq!(value, MotionValue::new(1.0));
    }
}

//! Pointer attraction
//!
//! While the pointer is inside the wrapped element the content leans toward it
//! by `strength` times the pointer's distance from the element centre. On
//! leave both axes spring back to rest with softer coefficients.

use serde::Serialize;
use tracing::debug;

use super::spring::{SpringParams, SpringValue, StepLimits};
use crate::clock::{ClockTick, FrameDriven};
use crate::geometry::{Point, Rect};

pub const DEFAULT_STRENGTH: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct Magnetic {
    strength: f64,
    x: SpringValue,
    y: SpringValue,
    track: SpringParams,
    snap: SpringParams,
    engaged: bool,
}

/// Translation to apply to the wrapped element this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MagneticOffset {
    pub x: f64,
    pub y: f64,
}

impl Default for Magnetic {
    fn default() -> Self {
        Self::new(DEFAULT_STRENGTH)
    }
}

impl Magnetic {
    pub fn new(strength: f64) -> Self {
        Self::with_springs(strength, SpringParams::MAGNETIC_TRACK, SpringParams::MAGNETIC_SNAP)
    }

    pub fn with_springs(strength: f64, track: SpringParams, snap: SpringParams) -> Self {
        let strength = if strength.is_finite() { strength } else { DEFAULT_STRENGTH };
        Self {
            strength,
            x: SpringValue::new(0.0, track),
            y: SpringValue::new(0.0, track),
            track,
            snap,
            engaged: false,
        }
    }

    pub fn with_limits(mut self, limits: StepLimits) -> Self {
        self.x = self.x.with_limits(limits);
        self.y = self.y.with_limits(limits);
        self
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Pointer moved while over `rect` (both in viewport coordinates)
    pub fn pointer_move(&mut self, pointer: Point, rect: &Rect) {
        if !pointer.is_finite() || !rect.is_measured() {
            return;
        }
        if !self.engaged {
            debug!(strength = self.strength, "Magnetic engaged");
            self.engaged = true;
        }
        let center = rect.center();
        self.x
            .animate_to((pointer.x - center.x) * self.strength, self.track);
        self.y
            .animate_to((pointer.y - center.y) * self.strength, self.track);
    }

    /// Pointer left: return to rest
    pub fn pointer_leave(&mut self) {
        if self.engaged {
            debug!("Magnetic released");
        }
        self.engaged = false;
        self.x.animate_to(0.0, self.snap);
        self.y.animate_to(0.0, self.snap);
    }

    pub fn update(&mut self, delta_ms: f64) -> MagneticOffset {
        self.x.update(delta_ms);
        self.y.update(delta_ms);
        self.offset()
    }

    pub fn offset(&self) -> MagneticOffset {
        MagneticOffset {
            x: self.x.get(),
            y: self.y.get(),
        }
    }

    pub fn is_at_rest(&self) -> bool {
        !self.engaged && self.x.is_settled() && self.y.is_settled()
    }
}

impl FrameDriven for Magnetic {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(magnetic: &mut Magnetic, frames: usize) {
        for _ in 0..frames {
            magnetic.update(16.0);
        }
    }

    #[test]
    fn test_leans_toward_pointer() {
        let mut magnetic = Magnetic::new(0.5);
        let rect = Rect::new(100.0, 100.0, 40.0, 20.0);
        magnetic.pointer_move(Point::new(140.0, 100.0), &rect);
        settle(&mut magnetic, 120);
        let offset = magnetic.offset();
        assert!((offset.x - 10.0).abs() < 0.05, "{:?}", offset);
        assert!((offset.y + 5.0).abs() < 0.05, "{:?}", offset);
    }

    #[test]
    fn test_no_jump_on_move() {
        let mut magnetic = Magnetic::default();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        magnetic.pointer_move(Point::new(100.0, 50.0), &rect);
        // Before any frame the value has not moved
        assert_eq!(magnetic.offset(), MagneticOffset::default());
        let first = magnetic.update(16.0);
        assert!(first.x > 0.0 && first.x < 20.0);
    }

    #[test]
    fn test_leave_springs_back_to_rest() {
        let mut magnetic = Magnetic::new(0.3);
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        magnetic.pointer_move(Point::new(0.0, 0.0), &rect);
        settle(&mut magnetic, 60);
        assert!(magnetic.offset().x < -10.0);

        magnetic.pointer_leave();
        assert!(!magnetic.is_engaged());
        settle(&mut magnetic, 200);
        assert!(magnetic.is_at_rest());
        assert_eq!(magnetic.offset(), MagneticOffset::default());
    }

    #[test]
    fn test_unmeasured_rect_is_ignored() {
        let mut magnetic = Magnetic::default();
        magnetic.pointer_move(Point::new(10.0, 10.0), &Rect::new(0.0, 0.0, f64::NAN, 1.0));
        assert!(!magnetic.is_engaged());
    }
}

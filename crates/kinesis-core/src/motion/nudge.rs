//! Hover nudge
//!
//! A small affordance (an arrow, a call to action) springs toward a fixed
//! offset while hovered and back to rest on leave.

use tracing::trace;

use super::magnetic::MagneticOffset;
use super::spring::{SpringParams, SpringValue, StepLimits};
use crate::clock::{ClockTick, FrameDriven};
use crate::config::SpringConfig;
use crate::geometry::Point;

#[derive(Debug, Clone)]
pub struct HoverNudge {
    target: Point,
    x: SpringValue,
    y: SpringValue,
    hovered: bool,
}

impl HoverNudge {
    pub fn new(target: Point, params: SpringParams) -> Self {
        Self {
            target,
            x: SpringValue::new(0.0, params),
            y: SpringValue::new(0.0, params),
            hovered: false,
        }
    }

    /// Springs from config, falling back to [`SpringParams::ARROW_HOVER`]
    pub fn from_config(target: Point, config: &SpringConfig) -> Self {
        Self {
            target,
            x: SpringValue::from_config(0.0, config, SpringParams::ARROW_HOVER),
            y: SpringValue::from_config(0.0, config, SpringParams::ARROW_HOVER),
            hovered: false,
        }
    }

    pub fn with_limits(mut self, limits: StepLimits) -> Self {
        self.x = self.x.with_limits(limits);
        self.y = self.y.with_limits(limits);
        self
    }

    pub fn pointer_enter(&mut self) {
        if !self.hovered {
            trace!(x = self.target.x, y = self.target.y, "Nudge out");
            self.hovered = true;
            self.x.set_target(self.target.x);
            self.y.set_target(self.target.y);
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.hovered {
            trace!("Nudge back");
            self.hovered = false;
            self.x.set_target(0.0);
            self.y.set_target(0.0);
        }
    }

    pub fn offset(&self) -> MagneticOffset {
        MagneticOffset {
            x: self.x.get(),
            y: self.y.get(),
        }
    }

    pub fn update(&mut self, delta_ms: f64) -> MagneticOffset {
        self.x.update(delta_ms);
        self.y.update(delta_ms);
        self.offset()
    }
}

impl FrameDriven for HoverNudge {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

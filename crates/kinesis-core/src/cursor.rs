//! Pointer variant state machine and cursor styling
//!
//! A single [`CursorContext`] is owned by the host and handed to every
//! interactive region. Regions call [`CursorContext::request_variant`] on
//! pointer enter and [`CursorContext::release_variant`] on pointer leave.
//! The most recent request wins and any release returns to
//! [`CursorVariant::Default`], even while another region is still hovered.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::clock::{ClockTick, FrameDriven};
use crate::config::MotionConfig;
use crate::geometry::Point;
use crate::motion::{SpringParams, SpringValue, StepLimits};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorVariant {
    #[default]
    Default,
    Hover,
    Text,
}

impl CursorVariant {
    /// Diameter in pixels
    pub fn size(&self) -> f64 {
        match self {
            CursorVariant::Default => 24.0,
            CursorVariant::Hover => 80.0,
            CursorVariant::Text => 110.0,
        }
    }

    /// Fill, border and blending for this variant
    pub fn style(&self, inverted_surface: bool) -> CursorStyle {
        let ink = if inverted_surface { Shade::Dark } else { Shade::Light };
        match self {
            CursorVariant::Default => CursorStyle {
                fill: None,
                border: Some(CursorBorder {
                    width: 1.5,
                    shade: ink,
                    alpha: 0.8,
                }),
                blend: BlendMode::Normal,
            },
            CursorVariant::Hover => CursorStyle {
                fill: Some(ink),
                border: None,
                blend: if inverted_surface {
                    BlendMode::Normal
                } else {
                    BlendMode::Difference
                },
            },
            CursorVariant::Text => CursorStyle {
                fill: Some(Shade::Light),
                border: None,
                blend: BlendMode::Difference,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shade {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Normal,
    /// Inverts whatever is underneath
    Difference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorBorder {
    pub width: f64,
    pub shade: Shade,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorStyle {
    pub fill: Option<Shade>,
    pub border: Option<CursorBorder>,
    pub blend: BlendMode,
}

/// Render snapshot: the cursor is a disc of `size` centred on `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorFrame {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub style: CursorStyle,
    pub variant: CursorVariant,
}

#[derive(Debug, Clone)]
pub struct CursorContext {
    variant: CursorVariant,
    inverted_surface: bool,
    pointer: Option<Point>,
    x: SpringValue,
    y: SpringValue,
    size: SpringValue,
    /// Set by input, cleared when a frame is taken
    dirty: bool,
}

impl Default for CursorContext {
    fn default() -> Self {
        Self::with_springs(SpringParams::CURSOR, StepLimits::default())
    }
}

impl CursorContext {
    pub fn new(config: &MotionConfig) -> Self {
        let limits = StepLimits::from(&config.clock);
        let spring = |initial| {
            SpringValue::from_config(initial, &config.springs.cursor, SpringParams::CURSOR)
                .with_limits(limits)
        };
        Self {
            variant: CursorVariant::Default,
            inverted_surface: false,
            pointer: None,
            x: spring(0.0),
            y: spring(0.0),
            size: spring(CursorVariant::Default.size()),
            dirty: true,
        }
    }

    pub fn with_springs(params: SpringParams, limits: StepLimits) -> Self {
        let spring = |initial| SpringValue::new(initial, params).with_limits(limits);
        Self {
            variant: CursorVariant::Default,
            inverted_surface: false,
            pointer: None,
            x: spring(0.0),
            y: spring(0.0),
            size: spring(CursorVariant::Default.size()),
            dirty: true,
        }
    }

    /// Region entered: the latest request wins
    pub fn request_variant(&mut self, variant: CursorVariant) {
        if self.variant != variant {
            debug!(from = ?self.variant, to = ?variant, "Cursor variant");
            self.variant = variant;
            self.size.set_target(variant.size());
            self.dirty = true;
        }
    }

    /// Region left: always back to `Default`
    pub fn release_variant(&mut self) {
        self.request_variant(CursorVariant::Default);
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    /// Sample the pointer. Every sample retargets the springs; integration
    /// happens once per frame in [`CursorContext::update`].
    pub fn pointer_move(&mut self, pointer: Point) {
        if !pointer.is_finite() {
            return;
        }
        if self.pointer.is_none() {
            // First sample places the cursor instead of flying in from the origin
            self.x.jump(pointer.x);
            self.y.jump(pointer.y);
        }
        self.pointer = Some(pointer);
        self.x.set_target(pointer.x);
        self.y.set_target(pointer.y);
        self.dirty = true;
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Pointer is over a light section
    pub fn set_inverted_surface(&mut self, inverted: bool) {
        if self.inverted_surface != inverted {
            trace!(inverted, "Cursor surface changed");
            self.inverted_surface = inverted;
            self.dirty = true;
        }
    }

    pub fn is_inverted_surface(&self) -> bool {
        self.inverted_surface
    }

    pub fn update(&mut self, delta_ms: f64) -> CursorFrame {
        if !self.is_at_rest() {
            self.x.update(delta_ms);
            self.y.update(delta_ms);
            self.size.update(delta_ms);
            self.dirty = true;
        }
        self.frame()
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_settled() && self.y.is_settled() && self.size.is_settled()
    }

    pub fn frame(&self) -> CursorFrame {
        CursorFrame {
            x: self.x.get(),
            y: self.y.get(),
            size: self.size.get(),
            style: self.variant.style(self.inverted_surface),
            variant: self.variant,
        }
    }

    /// The frame to draw, at most once per change
    pub fn take_frame(&mut self) -> Option<CursorFrame> {
        if !self.dirty || self.pointer.is_none() {
            return None;
        }
        self.dirty = false;
        Some(self.frame())
    }
}

impl FrameDriven for CursorContext {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

//! Infinite horizontal ticker
//!
//! The item sequence is rendered twice back to back. The offset advances at a
//! constant velocity and snaps back to 0 once it has travelled the width of
//! one unduplicated pass; at that moment the second copy sits exactly where
//! the first one started, so the loop is seamless.

use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{ClockTick, FrameDriven};
use crate::{Error, Result};

/// Travel direction of the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Content moves left (offset decreases)
    Left,
    /// Content moves right (offset increases)
    Right,
}

impl Direction {
    /// The page's default ticker moves left; `reverse` flips it
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickerState {
    pub offset: f64,
    /// Width of one pass; `None` until layout has been measured
    pub content_width: Option<f64>,
    pub velocity_px_per_ms: f64,
    pub direction: Direction,
}

/// Advance a ticker by `delta_ms`
///
/// Unmeasured content or a non-finite delta leaves the state unchanged. The
/// wrap is applied before the state is returned, so a rendered offset never
/// exceeds one pass.
pub fn advance(state: TickerState, delta_ms: f64) -> TickerState {
    let Some(width) = state.content_width else {
        return state;
    };
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return state;
    }
    let mut next = state;
    next.offset += state.direction.sign() * state.velocity_px_per_ms * delta_ms;
    if !next.offset.is_finite() || next.offset.abs() >= width {
        next.offset = 0.0;
    }
    next
}

/// Speed used when a band does not specify one
pub const DEFAULT_SPEED_PX_PER_S: f64 = 35.0;

#[derive(Debug, Clone)]
pub struct Ticker {
    items: Vec<String>,
    state: TickerState,
}

impl Ticker {
    /// `speed_px_per_s` is the scroll speed in pixels per second
    pub fn new(items: Vec<String>, speed_px_per_s: f64, reverse: bool) -> Result<Self> {
        if !(speed_px_per_s.is_finite() && speed_px_per_s >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "ticker speed must be finite and non-negative, got {speed_px_per_s}"
            )));
        }
        Ok(Self {
            items,
            state: TickerState {
                offset: 0.0,
                content_width: None,
                velocity_px_per_ms: speed_px_per_s / 1000.0,
                direction: Direction::from_reverse(reverse),
            },
        })
    }

    /// Record the width of one unduplicated pass
    ///
    /// Zero, negative or non-finite widths leave the ticker unmeasured.
    pub fn measure(&mut self, pass_width: f64) {
        if pass_width.is_finite() && pass_width > 0.0 {
            if self.state.content_width != Some(pass_width) {
                debug!(pass_width, "Ticker measured");
            }
            self.state.content_width = Some(pass_width);
            if self.state.offset.abs() >= pass_width {
                self.state.offset = 0.0;
            }
        } else {
            warn!(pass_width, "Ticker measurement not usable yet");
            self.state.content_width = None;
        }
    }

    /// Record the width of the whole duplicated strip
    pub fn measure_rendered(&mut self, rendered_width: f64) {
        self.measure(rendered_width / 2.0);
    }

    pub fn is_measured(&self) -> bool {
        self.state.content_width.is_some()
    }

    pub fn update(&mut self, delta_ms: f64) -> f64 {
        self.state = advance(self.state, delta_ms);
        self.state.offset
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    /// The item sequence as rendered: two copies back to back
    pub fn rendered_items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().chain(self.items.iter()).map(String::as_str)
    }
}

impl FrameDriven for Ticker {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod reveal;
pub mod scramble;
pub mod scroll;
pub mod ticker;

pub use clock::{ClockTick, FrameDriven, FrameScheduler, Interval, Subscription};
pub use config::MotionConfig;
pub use cursor::{CursorContext, CursorFrame, CursorVariant};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Viewport};
pub use motion::{EasingType, HoverNudge, Magnetic, SpringParams, SpringValue};
pub use reveal::{Counter, EntranceTween, RevealOptions, RevealTrigger, ViewportObserver};
pub use scramble::ScrambleText;
pub use scroll::{ElementId, ElementTracker, ProgressBar, ScrollTracker};
pub use ticker::{Direction, Ticker};

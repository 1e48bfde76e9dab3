//! Shared frame clock
//!
//! Every time-based component in the engine is advanced by one
//! [`FrameScheduler`]. The host calls [`FrameScheduler::frame`] once per
//! display refresh; each subscriber receives a [`ClockTick`] carrying the time
//! elapsed since *its own* previous invocation.
//!
//! # Usage
//!
//! ```ignore
//! use std::{cell::RefCell, rc::Rc};
//! use kinesis_core::clock::FrameScheduler;
//! use kinesis_core::ticker::Ticker;
//!
//! let scheduler = FrameScheduler::new();
//! let ticker = Rc::new(RefCell::new(Ticker::new(items, 35.0, false)?));
//! let subscription = scheduler.attach(ticker.clone());
//!
//! scheduler.frame(16.0);
//! subscription.cancel();
//! ```

mod scheduler;
pub mod timing;

pub use scheduler::{ClockTick, FrameDriven, FrameScheduler, Subscription};
pub use timing::Interval;

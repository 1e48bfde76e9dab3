//! Scroll progress tracking
//!
//! ## Atomic layer
//! - `tracker` - page-wide raw/smoothed offset and global progress, plus the
//!   spring-driven progress bar
//! - `element` - per-element enter/exit progress for parallax
//!
//! # Usage
//!
//! ```ignore
//! use kinesis_core::scroll::ScrollTracker;
//!
//! let mut tracker = ScrollTracker::default();
//! tracker.on_resize(viewport, document_height - viewport.height);
//!
//! // Scroll events
//! tracker.on_scroll(420.0);
//!
//! // Every frame
//! let state = tracker.update(delta_ms);
//! ```

pub mod element;
pub mod tracker;

pub use element::{ElementId, ElementProgress, ElementTracker, Intersection, ScrollOffsets};
pub use tracker::{ProgressBar, ScrollState, ScrollTracker};

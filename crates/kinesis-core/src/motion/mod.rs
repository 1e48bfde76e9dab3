//! Continuous values and the dynamics that move them
//!
//! ## Atomic layer
//! - `value` - the mutable scalar cell ([`MotionValue`])
//! - `spring` - spring-damper integration
//! - `easing` - pure easing curves
//! - `transform` - range mapping for scroll-linked properties
//!
//! ## Composite layer
//! - `magnetic` - pointer attraction built from two springs
//! - `nudge` - fixed hover offset on a spring

pub mod easing;
pub mod spring;
pub mod transform;
pub mod value;

pub mod magnetic;
pub mod nudge;

pub use easing::EasingType;
pub use magnetic::Magnetic;
pub use nudge::HoverNudge;
pub use spring::{advance, SpringParams, SpringValue, StepLimits};
pub use transform::map_range;
pub use value::MotionValue;

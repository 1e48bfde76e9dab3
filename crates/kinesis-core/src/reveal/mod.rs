//! One-shot viewport reveals and the animations they gate
//!
//! - `trigger` - the per-element `Idle -> Triggered` state machine
//! - `observer` - registry of triggers keyed by element
//! - `counter` - integer count-up started by a reveal
//! - `entrance` - eased, delayed entrance tween started by a reveal

pub mod counter;
pub mod entrance;
pub mod observer;
pub mod trigger;

pub use counter::{Counter, CounterPhase};
pub use entrance::{stagger, EntranceTween};
pub use observer::ViewportObserver;
pub use trigger::{RevealEvent, RevealOptions, RevealPhase, RevealTrigger};

//! Animation support for swipe-deck.
//!
//! The central type is [`AnimatedValueXY`], a 2-D value with three
//! operations:
//!
//! - `set(v)` writes the value directly (used while a finger drags a card);
//! - `animate_to(v, spec, now)` moves it along a [`AnimationSpec::Timed`]
//!   curve or a [`AnimationSpec::Spring`];
//! - `derive(fn)` produces a read-only view such as a card's style.
//!
//! Animations never read the clock themselves. The host passes the frame
//! timestamp to [`AnimatedValueXY::tick`], which makes them deterministic
//! under test.

mod easing;
mod spring;
mod timed;
mod value;

pub use easing::{Easing, ease};
pub use spring::{SpringMotion, SpringSpec};
pub use timed::TimedTransition;
pub use value::{AnimatedValueXY, AnimationSpec, AnimationStatus, AnimationToken, Derived};

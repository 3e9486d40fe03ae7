//! Compile-time tuning of the deck.
//!
//! These are deliberately not part of [`DeckConfig`](crate::DeckConfig):
//! every deck swipes, flings and stacks the same way.

use std::time::Duration;

use swipe_deck_core::animation::{Easing, SpringSpec};

/// Fraction of the screen width a drag must exceed to count as a swipe.
pub const SWIPE_THRESHOLD_RATIO: f32 = 0.25;

/// Duration of the fling-out transition after a swipe.
pub const SWIPE_OUT_DURATION: Duration = Duration::from_millis(250);

/// Easing of the fling-out transition.
pub const SWIPE_OUT_EASING: Easing = Easing::EaseInOut;

/// Spring that returns a released card to its resting origin.
pub const SNAP_BACK_SPRING: SpringSpec = SpringSpec::DEFAULT;

/// Rotation knots sit at `±ROTATION_RANGE_RATIO × screen_width`.
pub const ROTATION_RANGE_RATIO: f32 = 1.5;

/// Rotation in degrees reached at the outer rotation knots.
pub const MAX_ROTATION_DEGREES: f32 = 120.0;

/// Vertical inset of a stacked card per depth step.
pub const STACK_INSET_PER_DEPTH: f32 = 5.0;

/// Spring that slides the stack up after a card departs.
pub const LAYOUT_SHIFT_SPRING: SpringSpec = SpringSpec {
    stiffness: 170.0,
    damping: 26.0,
    mass: 1.0,
    rest_displacement: 0.01,
    rest_speed: 0.01,
};

/// Swipe threshold for a given screen width.
#[inline]
pub fn swipe_threshold(screen_width: f32) -> f32 {
    SWIPE_THRESHOLD_RATIO * screen_width
}

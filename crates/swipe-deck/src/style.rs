//! Visual style derived from the deck's state.
//!
//! The top card is translated by the animated position and rotated by an
//! angle interpolated from its horizontal offset. Cards underneath are not
//! animated; each is inset vertically according to its depth in the stack.

use swipe_deck_core::Point;

use crate::constants::{MAX_ROTATION_DEGREES, ROTATION_RANGE_RATIO, STACK_INSET_PER_DEPTH};

/// Piecewise-linear mapping through `N` knots.
///
/// Inputs outside the knot range are extrapolated along the nearest outer
/// segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation<const N: usize> {
    input: [f32; N],
    output: [f32; N],
}

impl<const N: usize> Interpolation<N> {
    /// Build an interpolation from matching knot arrays.
    ///
    /// `input` must be strictly increasing and have at least two knots.
    pub fn new(input: [f32; N], output: [f32; N]) -> Self {
        debug_assert!(N >= 2, "interpolation needs at least two knots");
        debug_assert!(
            input.windows(2).all(|w| w[0] < w[1]),
            "interpolation input must be strictly increasing"
        );
        Self { input, output }
    }

    /// Map `x` through the knots.
    pub fn sample(&self, x: f32) -> f32 {
        let last = N - 1;
        // Segment whose right knot is the first knot >= x, clamped to the
        // outer segments for extrapolation.
        let upper = self.input.partition_point(|&knot| knot < x).clamp(1, last);
        let (x0, x1) = (self.input[upper - 1], self.input[upper]);
        let (y0, y1) = (self.output[upper - 1], self.output[upper]);
        if x == x1 {
            return y1;
        }
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }
}

/// Rotation curve of the top card for a given screen width.
pub fn rotation_curve(screen_width: f32) -> Interpolation<3> {
    let reach = ROTATION_RANGE_RATIO * screen_width;
    Interpolation::new(
        [-reach, 0.0, reach],
        [-MAX_ROTATION_DEGREES, 0.0, MAX_ROTATION_DEGREES],
    )
}

/// Rotation in degrees of a top card displaced horizontally by `x`.
pub fn rotation_for_offset(x: f32, screen_width: f32) -> f32 {
    rotation_curve(screen_width).sample(x)
}

/// Vertical inset of a card `depth` steps below the top card.
pub fn stack_inset(depth: usize) -> f32 {
    STACK_INSET_PER_DEPTH * depth as f32
}

/// Translation and rotation of the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Offset from the card's resting origin.
    pub translation: Point,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f32,
}

impl CardTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Point::ZERO,
        rotation_degrees: 0.0,
    };

    /// Style of a top card displaced by `position`.
    pub fn for_position(position: Point, screen_width: f32) -> Self {
        Self {
            translation: position,
            rotation_degrees: rotation_for_offset(position.x, screen_width),
        }
    }

    /// Rotation in radians.
    pub fn rotation_radians(&self) -> f32 {
        self.rotation_degrees.to_radians()
    }

    /// Affine transform rotating about `pivot` (in card coordinates), then
    /// translating.
    pub fn to_affine(&self, pivot: Point) -> glam::Affine2 {
        let pivot = pivot.to_vec2();
        glam::Affine2::from_translation(self.translation.to_vec2() + pivot)
            * glam::Affine2::from_angle(self.rotation_radians())
            * glam::Affine2::from_translation(-pivot)
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Style applied to one rendered card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStyle {
    /// The top card, following the animated position.
    Animated(CardTransform),
    /// A card below the top, inset by its depth.
    Stacked {
        /// Vertical inset in logical pixels.
        inset: f32,
    },
}

impl CardStyle {
    /// Style of a card `depth` steps below the top.
    pub fn stacked(depth: usize) -> Self {
        Self::Stacked {
            inset: stack_inset(depth),
        }
    }

    /// Total vertical offset contributed by the style's position.
    pub fn vertical_offset(&self) -> f32 {
        match self {
            Self::Animated(transform) => transform.translation.y,
            Self::Stacked { inset } => *inset,
        }
    }
}

//! Timed transitions between two points.

use std::time::{Duration, Instant};

use crate::Point;

use super::easing::Easing;

/// A fixed-duration transition from one point to another.
///
/// The transition is sampled with explicit timestamps, so the caller decides
/// what "now" is on every frame.
#[derive(Debug, Clone)]
pub struct TimedTransition {
    from: Point,
    to: Point,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl TimedTransition {
    /// Start a transition at `started_at`.
    pub fn new(from: Point, to: Point, duration: Duration, easing: Easing, started_at: Instant) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing,
        }
    }

    /// The point the transition ends at.
    pub fn target(&self) -> Point {
        self.to
    }

    /// Raw (un-eased) progress in `[0, 1]` at `now`.
    ///
    /// A zero duration is complete immediately.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Sample the transition at `now`.
    ///
    /// Returns the current point and whether the transition has finished.
    /// The final sample is exactly the target.
    pub fn sample(&self, now: Instant) -> (Point, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, self.easing.apply(progress)), false)
    }
}

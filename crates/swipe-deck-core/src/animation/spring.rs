//! Damped spring motion.
//!
//! The spring is integrated with semi-implicit Euler in fixed one-millisecond
//! steps, which keeps it stable regardless of the host's frame rate.

use std::time::{Duration, Instant};

use crate::Point;

/// Integration step.
const STEP: Duration = Duration::from_millis(1);

/// Largest frame delta fed to the integrator.
///
/// A host that stalls for longer (debugger, suspended window) resumes the
/// spring where it left off instead of jumping.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(64);

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Spring constant.
    pub stiffness: f32,
    /// Damping coefficient.
    pub damping: f32,
    /// Mass of the moving body.
    pub mass: f32,
    /// Distance from the target below which the spring may rest.
    pub rest_displacement: f32,
    /// Speed below which the spring may rest.
    pub rest_speed: f32,
}

impl SpringSpec {
    /// A moderately bouncy spring (damping ratio 0.5).
    pub const DEFAULT: Self = Self {
        stiffness: 100.0,
        damping: 10.0,
        mass: 1.0,
        rest_displacement: 0.001,
        rest_speed: 0.001,
    };

    /// Damping ratio; below 1.0 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A spring in flight toward a target point.
#[derive(Debug, Clone)]
pub struct SpringMotion {
    spec: SpringSpec,
    target: Point,
    position: Point,
    velocity: Point,
    last_tick: Instant,
}

impl SpringMotion {
    /// Start a spring at `position`, at rest, pulled toward `target`.
    pub fn new(spec: SpringSpec, position: Point, target: Point, started_at: Instant) -> Self {
        debug_assert!(spec.mass > 0.0, "spring mass must be positive");
        Self {
            spec,
            target,
            position,
            velocity: Point::ZERO,
            last_tick: started_at,
        }
    }

    /// The point the spring is pulled toward.
    pub fn target(&self) -> Point {
        self.target
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Advance the spring to `now`.
    ///
    /// Returns the current point and whether the spring has come to rest. A
    /// resting spring lands exactly on its target.
    pub fn step(&mut self, now: Instant) -> (Point, bool) {
        let elapsed = now.saturating_duration_since(self.last_tick).min(MAX_FRAME_DELTA);
        self.last_tick = now;

        let dt = STEP.as_secs_f32();
        let steps = (elapsed.as_micros() / STEP.as_micros()) as u32;
        for _ in 0..steps {
            let displacement = self.position - self.target;
            let force = displacement * -self.spec.stiffness - self.velocity * self.spec.damping;
            let acceleration = force * (1.0 / self.spec.mass);
            self.velocity = self.velocity + acceleration * dt;
            self.position = self.position + self.velocity * dt;
        }

        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = Point::ZERO;
            return (self.target, true);
        }
        (self.position, false)
    }

    fn is_at_rest(&self) -> bool {
        let offset = self.position - self.target;
        offset.x.abs() <= self.spec.rest_displacement
            && offset.y.abs() <= self.spec.rest_displacement
            && self.velocity.x.abs() <= self.spec.rest_speed
            && self.velocity.y.abs() <= self.spec.rest_speed
    }
}

//! Animatable 2-D values.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::Point;
use crate::logging::targets;
use crate::property::{Property, PropertyReader};

use super::easing::Easing;
use super::spring::{SpringMotion, SpringSpec};
use super::timed::TimedTransition;

/// How an [`AnimatedValueXY`] travels to a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    /// Fixed-duration transition along an easing curve.
    Timed {
        /// Total duration.
        duration: Duration,
        /// Easing curve.
        easing: Easing,
    },
    /// Damped spring; finishes when the spring comes to rest.
    Spring(SpringSpec),
}

impl AnimationSpec {
    /// A timed transition.
    pub fn timed(duration: Duration, easing: Easing) -> Self {
        Self::Timed { duration, easing }
    }

    /// A spring transition.
    pub fn spring(spec: SpringSpec) -> Self {
        Self::Spring(spec)
    }
}

/// Identifies one started animation.
///
/// Tokens are unique per value, so a completion can be matched against the
/// animation the caller attached its follow-up work to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

impl AnimationToken {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of advancing an [`AnimatedValueXY`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Nothing is animating.
    Idle,
    /// An animation is still in flight.
    Running(AnimationToken),
    /// The animation finished on this frame. Reported exactly once.
    Completed(AnimationToken),
}

#[derive(Debug, Clone)]
enum Motion {
    Timed(TimedTransition),
    Spring(SpringMotion),
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    token: AnimationToken,
    motion: Motion,
}

/// An animatable 2-D value.
///
/// The value can be written directly with [`set`](Self::set), moved along a
/// transition with [`animate_to`](Self::animate_to), and observed through
/// [`reader`](Self::reader) or [`derive`](Self::derive). At most one
/// animation runs at a time; starting a new one replaces the old one without
/// reporting its completion.
pub struct AnimatedValueXY {
    value: Arc<Property<Point>>,
    active: Option<ActiveAnimation>,
    next_token: u64,
}

impl AnimatedValueXY {
    /// Create a value resting at `initial`.
    pub fn new(initial: Point) -> Self {
        Self {
            value: Arc::new(Property::new(initial)),
            active: None,
            next_token: 0,
        }
    }

    /// The current value.
    pub fn value(&self) -> Point {
        self.value.get()
    }

    /// Write the value directly, stopping any running animation.
    pub fn set(&mut self, value: Point) {
        debug_assert!(value.is_finite(), "animated value must be finite: {value:?}");
        if let Some(stopped) = self.active.take() {
            tracing::trace!(target: targets::ANIMATION, token = stopped.token.0, "set() stopped animation");
        }
        self.value.set(value);
    }

    /// Start animating toward `target` from the current value.
    ///
    /// Any running animation is replaced; its completion will never be
    /// reported.
    pub fn animate_to(&mut self, target: Point, spec: AnimationSpec, now: Instant) -> AnimationToken {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;

        let from = self.value();
        let motion = match spec {
            AnimationSpec::Timed { duration, easing } => {
                Motion::Timed(TimedTransition::new(from, target, duration, easing, now))
            }
            AnimationSpec::Spring(spring) => Motion::Spring(SpringMotion::new(spring, from, target, now)),
        };
        tracing::trace!(
            target: targets::ANIMATION,
            token = token.0,
            from_x = from.x,
            to_x = target.x,
            spring = matches!(spec, AnimationSpec::Spring(_)),
            "animation started"
        );
        self.active = Some(ActiveAnimation { token, motion });
        token
    }

    /// Stop the running animation where it is.
    ///
    /// Returns the token of the stopped animation. Its completion will never
    /// be reported.
    pub fn stop(&mut self) -> Option<AnimationToken> {
        self.active.take().map(|active| active.token)
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Token of the animation in flight, if any.
    pub fn active_token(&self) -> Option<AnimationToken> {
        self.active.as_ref().map(|active| active.token)
    }

    /// Advance the running animation to `now`.
    pub fn tick(&mut self, now: Instant) -> AnimationStatus {
        let Some(active) = self.active.as_mut() else {
            return AnimationStatus::Idle;
        };

        let (point, done) = match &mut active.motion {
            Motion::Timed(transition) => transition.sample(now),
            Motion::Spring(spring) => spring.step(now),
        };
        self.value.set(point);

        let token = active.token;
        if done {
            self.active = None;
            tracing::trace!(target: targets::ANIMATION, token = token.0, "animation completed");
            AnimationStatus::Completed(token)
        } else {
            AnimationStatus::Running(token)
        }
    }

    /// A read-only handle that observes this value.
    pub fn reader(&self) -> PropertyReader<Point> {
        PropertyReader::new(Arc::clone(&self.value))
    }

    /// A read-only view that maps this value through `map` on every read.
    pub fn derive<R, F>(&self, map: F) -> Derived<R, F>
    where
        F: Fn(Point) -> R,
    {
        Derived {
            source: self.reader(),
            map,
            _output: PhantomData,
        }
    }
}

impl Default for AnimatedValueXY {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}

impl fmt::Debug for AnimatedValueXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValueXY")
            .field("value", &self.value())
            .field("active", &self.active_token())
            .finish()
    }
}

/// A read-only value computed from an [`AnimatedValueXY`].
pub struct Derived<R, F> {
    source: PropertyReader<Point>,
    map: F,
    _output: PhantomData<fn() -> R>,
}

impl<R, F> Derived<R, F>
where
    F: Fn(Point) -> R,
{
    /// Compute the derived value from the source's current value.
    pub fn get(&self) -> R {
        (self.map)(self.source.get())
    }
}

impl<R, F: Clone> Clone for Derived<R, F> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            map: self.map.clone(),
            _output: PhantomData,
        }
    }
}

impl<R, F> fmt::Debug for Derived<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived").field("source", &self.source).finish()
    }
}

static_assertions::assert_impl_all!(AnimatedValueXY: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_set_writes_and_stops() {
        let start = Instant::now();
        let mut value = AnimatedValueXY::default();
        value.animate_to(Point::new(10.0, 0.0), AnimationSpec::spring(SpringSpec::DEFAULT), start);
        assert!(value.is_animating());

        value.set(Point::new(3.0, 4.0));
        assert!(!value.is_animating());
        assert_eq!(value.value(), Point::new(3.0, 4.0));
        assert_eq!(value.tick(start + FRAME), AnimationStatus::Idle);
    }

    #[test]
    fn test_timed_completion_reported_once() {
        let start = Instant::now();
        let mut value = AnimatedValueXY::new(Point::new(150.0, 20.0));
        let token = value.animate_to(
            Point::new(400.0, 0.0),
            AnimationSpec::timed(Duration::from_millis(250), Easing::EaseInOut),
            start,
        );

        assert_eq!(value.tick(start + Duration::from_millis(100)), AnimationStatus::Running(token));
        assert_eq!(value.tick(start + Duration::from_millis(250)), AnimationStatus::Completed(token));
        assert_eq!(value.value(), Point::new(400.0, 0.0));
        assert_eq!(value.tick(start + Duration::from_millis(300)), AnimationStatus::Idle);
    }

    #[test]
    fn test_replacing_animation_drops_old_completion() {
        let start = Instant::now();
        let mut value = AnimatedValueXY::default();
        let first = value.animate_to(
            Point::new(100.0, 0.0),
            AnimationSpec::timed(Duration::from_millis(100), Easing::Linear),
            start,
        );
        let second = value.animate_to(
            Point::new(-100.0, 0.0),
            AnimationSpec::timed(Duration::from_millis(100), Easing::Linear),
            start,
        );
        assert_ne!(first, second);
        assert_eq!(value.tick(start + Duration::from_millis(100)), AnimationStatus::Completed(second));
    }

    #[test]
    fn test_stop_suppresses_completion() {
        let start = Instant::now();
        let mut value = AnimatedValueXY::default();
        let token = value.animate_to(
            Point::new(100.0, 0.0),
            AnimationSpec::timed(Duration::from_millis(100), Easing::Linear),
            start,
        );
        value.tick(start + Duration::from_millis(50));
        assert_eq!(value.stop(), Some(token));
        assert_eq!(value.tick(start + Duration::from_millis(200)), AnimationStatus::Idle);
        assert!((value.value().x - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_returns_to_origin() {
        let start = Instant::now();
        let mut value = AnimatedValueXY::new(Point::new(80.0, -12.0));
        let token = value.animate_to(Point::ZERO, AnimationSpec::spring(SpringSpec::DEFAULT), start);

        let mut now = start;
        let mut completed = false;
        for _ in 0..1000 {
            now += FRAME;
            if value.tick(now) == AnimationStatus::Completed(token) {
                completed = true;
                break;
            }
        }
        assert!(completed);
        assert_eq!(value.value(), Point::ZERO);
    }

    #[test]
    fn test_reader_and_derive_observe_value() {
        let mut value = AnimatedValueXY::default();
        let reader = value.reader();
        let doubled_x = value.derive(|p| p.x * 2.0);

        value.set(Point::new(21.0, 0.0));
        assert_eq!(reader.get(), Point::new(21.0, 0.0));
        assert_eq!(doubled_x.get(), 42.0);
        assert_eq!(doubled_x.clone().get(), 42.0);
    }

    #[test]
    fn test_derive_holds_map_inline() {
        let mut value = AnimatedValueXY::default();
        let negated = value.derive(|p| -p.x);
        assert_eq!(
            std::mem::size_of_val(&negated),
            std::mem::size_of::<PropertyReader<Point>>()
        );

        // Maps need not be Send or Sync.
        let offset = std::rc::Rc::new(5.0f32);
        let shifted = value.derive(move |p| p.x + *offset);

        value.set(Point::new(2.0, 0.0));
        assert_eq!(negated.get(), -2.0);
        assert_eq!(shifted.get(), 7.0);
    }
}

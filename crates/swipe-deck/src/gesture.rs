//! Swipe recognition from pointer events.
//!
//! The recognizer is split in two:
//!
//! - [`SwipePolicy`] holds three pure decisions: whether a pointer-down
//!   claims the gesture, what displacement a drag produces, and how a
//!   finished drag is classified.
//! - [`SwipeRecognizer`] tracks the single claimed pointer across events and
//!   applies the policy, producing [`GestureUpdate`]s.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use swipe_deck::gesture::{GestureUpdate, PointerEvent, SwipeClassification, SwipePolicy, SwipeRecognizer};
//! use swipe_deck_core::Point;
//!
//! let t0 = Instant::now();
//! let mut recognizer = SwipeRecognizer::new(SwipePolicy::for_screen_width(400.0));
//!
//! recognizer.process(&PointerEvent::down(1, Point::new(200.0, 300.0), t0));
//! recognizer.process(&PointerEvent::moved(1, Point::new(360.0, 310.0), t0 + Duration::from_millis(80)));
//! let update = recognizer.process(&PointerEvent::up(1, Point::new(360.0, 310.0), t0 + Duration::from_millis(90)));
//!
//! match update {
//!     Some(GestureUpdate::Ended { classification, .. }) => {
//!         assert_eq!(classification, SwipeClassification::Right);
//!     }
//!     other => panic!("unexpected update: {other:?}"),
//! }
//! ```

use std::time::Instant;

use swipe_deck_core::Point;
use swipe_deck_core::logging::targets;

use crate::constants::swipe_threshold;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Finger touched down or button pressed.
    Down,
    /// Pointer moved while down.
    Moved,
    /// Finger lifted or button released.
    Up,
    /// The platform took the pointer away (e.g. a system gesture).
    Cancelled,
}

/// A single pointer sample routed to the deck's top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Identifies the finger or mouse that produced the event.
    pub pointer_id: u64,
    /// What happened.
    pub phase: PointerPhase,
    /// Position in window coordinates.
    pub position: Point,
    /// When the event was produced.
    pub timestamp: Instant,
}

impl PointerEvent {
    /// Create a pointer event.
    pub fn new(pointer_id: u64, phase: PointerPhase, position: Point, timestamp: Instant) -> Self {
        Self {
            pointer_id,
            phase,
            position,
            timestamp,
        }
    }

    /// A pointer-down event.
    pub fn down(pointer_id: u64, position: Point, timestamp: Instant) -> Self {
        Self::new(pointer_id, PointerPhase::Down, position, timestamp)
    }

    /// A pointer-move event.
    pub fn moved(pointer_id: u64, position: Point, timestamp: Instant) -> Self {
        Self::new(pointer_id, PointerPhase::Moved, position, timestamp)
    }

    /// A pointer-up event.
    pub fn up(pointer_id: u64, position: Point, timestamp: Instant) -> Self {
        Self::new(pointer_id, PointerPhase::Up, position, timestamp)
    }

    /// A pointer-cancel event.
    pub fn cancelled(pointer_id: u64, position: Point, timestamp: Instant) -> Self {
        Self::new(pointer_id, PointerPhase::Cancelled, position, timestamp)
    }
}

/// Direction a card leaves the deck in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
}

impl SwipeDirection {
    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Terminal classification of a released drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeClassification {
    /// Dragged left beyond the threshold.
    Left,
    /// Dragged right beyond the threshold.
    Right,
    /// Not far enough; the card returns to rest.
    Cancel,
}

impl SwipeClassification {
    /// The swipe direction, or `None` for a cancel.
    pub fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Left => Some(SwipeDirection::Left),
            Self::Right => Some(SwipeDirection::Right),
            Self::Cancel => None,
        }
    }
}

impl From<SwipeDirection> for SwipeClassification {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::Left,
            SwipeDirection::Right => Self::Right,
        }
    }
}

/// Snapshot of a drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGesture {
    /// Where the pointer went down.
    pub start: Point,
    /// Where the pointer is now.
    pub current: Point,
    /// Total horizontal offset since pointer-down.
    pub dx: f32,
    /// Total vertical offset since pointer-down.
    pub dy: f32,
    /// Latest velocity in pixels per second.
    pub velocity: Point,
}

impl PanGesture {
    fn new(start: Point, current: Point, velocity: Point) -> Self {
        Self {
            start,
            current,
            dx: current.x - start.x,
            dy: current.y - start.y,
            velocity,
        }
    }

    /// Total offset since pointer-down.
    pub fn translation(&self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

/// The pure decisions of swipe recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePolicy {
    threshold: f32,
}

impl SwipePolicy {
    /// A policy with an explicit swipe threshold.
    pub fn new(threshold: f32) -> Self {
        debug_assert!(threshold >= 0.0, "swipe threshold must not be negative");
        Self { threshold }
    }

    /// A policy using the standard threshold for `screen_width`.
    pub fn for_screen_width(screen_width: f32) -> Self {
        Self::new(swipe_threshold(screen_width))
    }

    /// The horizontal distance a drag must exceed.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The deck has no competing recognizers, so every pointer-down claims.
    pub fn should_claim(&self, event: &PointerEvent) -> bool {
        event.phase == PointerPhase::Down
    }

    /// Displacement written to the card: the raw offset, unfiltered.
    pub fn on_move(&self, gesture: &PanGesture) -> Point {
        gesture.translation()
    }

    /// Classify a released drag by its horizontal offset alone.
    pub fn on_end(&self, gesture: &PanGesture) -> SwipeClassification {
        if gesture.dx > self.threshold {
            SwipeClassification::Right
        } else if gesture.dx < -self.threshold {
            SwipeClassification::Left
        } else {
            SwipeClassification::Cancel
        }
    }
}

/// Output of [`SwipeRecognizer::process`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// A pointer-down claimed the gesture.
    Claimed(PanGesture),
    /// The claimed pointer moved; `displacement` should be written to the card.
    Moved {
        gesture: PanGesture,
        displacement: Point,
    },
    /// The claimed pointer was released or cancelled.
    Ended {
        gesture: PanGesture,
        classification: SwipeClassification,
    },
}

#[derive(Debug, Clone, Copy)]
struct TrackedPointer {
    id: u64,
    start: Point,
    current: Point,
    last_timestamp: Instant,
    velocity: Point,
}

impl TrackedPointer {
    fn update(&mut self, position: Point, timestamp: Instant) {
        let dt = timestamp.saturating_duration_since(self.last_timestamp).as_secs_f32();
        if dt > 0.0 {
            self.velocity = (position - self.current) * (1.0 / dt);
        }
        self.current = position;
        self.last_timestamp = timestamp;
    }

    fn gesture(&self) -> PanGesture {
        PanGesture::new(self.start, self.current, self.velocity)
    }
}

/// Tracks one pointer at a time and classifies its drag.
///
/// Pointers other than the claimed one are ignored, and a disabled
/// recognizer (no top card) ignores everything.
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    policy: SwipePolicy,
    tracked: Option<TrackedPointer>,
    enabled: bool,
}

impl SwipeRecognizer {
    /// Create an enabled recognizer.
    pub fn new(policy: SwipePolicy) -> Self {
        Self {
            policy,
            tracked: None,
            enabled: true,
        }
    }

    /// The policy in use.
    pub fn policy(&self) -> &SwipePolicy {
        &self.policy
    }

    /// Whether a pointer is currently claimed.
    pub fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    /// Whether the recognizer reacts to input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attach or detach the recognizer. Detaching drops any tracked pointer.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    /// Forget the tracked pointer without classifying it.
    pub fn reset(&mut self) {
        if let Some(tracked) = self.tracked.take() {
            tracing::trace!(target: targets::GESTURE, pointer_id = tracked.id, "gesture dropped");
        }
    }

    /// Feed one pointer event.
    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureUpdate> {
        debug_assert!(event.position.is_finite(), "pointer position must be finite");
        if !self.enabled {
            return None;
        }

        match event.phase {
            PointerPhase::Down => self.handle_down(event),
            PointerPhase::Moved => self.handle_move(event),
            PointerPhase::Up | PointerPhase::Cancelled => self.handle_end(event),
        }
    }

    fn handle_down(&mut self, event: &PointerEvent) -> Option<GestureUpdate> {
        if self.tracked.is_some() || !self.policy.should_claim(event) {
            return None;
        }

        let tracked = TrackedPointer {
            id: event.pointer_id,
            start: event.position,
            current: event.position,
            last_timestamp: event.timestamp,
            velocity: Point::ZERO,
        };
        self.tracked = Some(tracked);
        tracing::trace!(target: targets::GESTURE, pointer_id = event.pointer_id, "gesture claimed");
        Some(GestureUpdate::Claimed(tracked.gesture()))
    }

    fn handle_move(&mut self, event: &PointerEvent) -> Option<GestureUpdate> {
        let tracked = self.tracked.as_mut().filter(|t| t.id == event.pointer_id)?;
        tracked.update(event.position, event.timestamp);

        let gesture = tracked.gesture();
        Some(GestureUpdate::Moved {
            gesture,
            displacement: self.policy.on_move(&gesture),
        })
    }

    fn handle_end(&mut self, event: &PointerEvent) -> Option<GestureUpdate> {
        let mut tracked = self.tracked.take_if(|t| t.id == event.pointer_id)?;

        let classification = if event.phase == PointerPhase::Cancelled {
            SwipeClassification::Cancel
        } else {
            tracked.update(event.position, event.timestamp);
            self.policy.on_end(&tracked.gesture())
        };
        tracing::debug!(
            target: targets::GESTURE,
            pointer_id = tracked.id,
            dx = tracked.current.x - tracked.start.x,
            ?classification,
            "gesture ended"
        );
        Some(GestureUpdate::Ended {
            gesture: tracked.gesture(),
            classification,
        })
    }
}

static_assertions::assert_impl_all!(SwipeRecognizer: Send, Sync);
static_assertions::assert_impl_all!(PointerEvent: Send, Sync, Copy);

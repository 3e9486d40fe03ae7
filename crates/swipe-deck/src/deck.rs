//! The swipe deck state machine.
//!
//! A [`Deck`] owns an immutable list of items and a cursor into it. The item
//! under the cursor is the top card: the host routes pointer events for that
//! card to [`Deck::handle_pointer`], drives animations with [`Deck::tick`]
//! once per frame and draws whatever [`Deck::render`] returns.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! use swipe_deck::{Deck, DeckItem, DeckState, PointerEvent, render_fns};
//! use swipe_deck_core::Point;
//!
//! #[derive(Debug, Clone)]
//! struct Profile {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! impl DeckItem for Profile {
//!     type Key = u32;
//!     fn key(&self) -> Option<u32> {
//!         Some(self.id)
//!     }
//! }
//!
//! let data: Arc<[Profile]> = Arc::from(vec![
//!     Profile { id: 1, name: "Ada" },
//!     Profile { id: 2, name: "Grace" },
//! ]);
//! let mut deck = Deck::with_defaults(data, 400.0);
//! deck.swiped_right.connect(|profile| println!("liked {}", profile.name));
//!
//! let t0 = Instant::now();
//! deck.handle_pointer(&PointerEvent::down(1, Point::new(200.0, 300.0), t0));
//! deck.handle_pointer(&PointerEvent::moved(1, Point::new(350.0, 300.0), t0 + Duration::from_millis(50)));
//! deck.handle_pointer(&PointerEvent::up(1, Point::new(350.0, 300.0), t0 + Duration::from_millis(60)));
//! assert!(matches!(deck.state(), DeckState::FlingingOut(_)));
//!
//! deck.tick(t0 + Duration::from_millis(400));
//! assert_eq!(deck.index(), 1);
//!
//! let frame = deck.render(&render_fns(|p: &Profile| p.name, || "no more profiles"));
//! assert_eq!(frame.top_card().map(|card| card.content), Some("Grace"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use swipe_deck_core::animation::{AnimatedValueXY, AnimationSpec, AnimationStatus, AnimationToken, Derived};
use swipe_deck_core::logging::targets;
use swipe_deck_core::{PerfSpan, Point, Property, PropertyReader, Signal};

use crate::config::DeckConfig;
use crate::constants::{LAYOUT_SHIFT_SPRING, SNAP_BACK_SPRING, STACK_INSET_PER_DEPTH, SWIPE_OUT_DURATION, SWIPE_OUT_EASING};
use crate::gesture::{
    GestureUpdate, PointerEvent, PointerPhase, SwipeClassification, SwipeDirection, SwipePolicy, SwipeRecognizer,
};
use crate::item::{CardKey, DeckItem};
use crate::render::{CardRenderer, DeckFrame, RenderedCard};
use crate::style::{CardStyle, CardTransform};

/// Observable state of a [`Deck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckState {
    /// The top card rests at the origin.
    Idle,
    /// A pointer is dragging the top card.
    Dragging,
    /// The top card is leaving the screen.
    FlingingOut(SwipeDirection),
    /// The top card is springing back to the origin.
    SpringingBack,
    /// Every card has been swiped.
    Exhausted,
}

impl DeckState {
    /// Whether a new drag or programmatic swipe may start.
    pub fn accepts_swipe(self) -> bool {
        matches!(self, Self::Idle | Self::SpringingBack)
    }

    fn settled(exhausted: bool) -> Self {
        if exhausted { Self::Exhausted } else { Self::Idle }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingFling {
    token: AnimationToken,
    direction: SwipeDirection,
    generation: u64,
}

/// A stack of swipeable cards.
///
/// # Signals
///
/// - `swiped_left(T)` / `swiped_right(T)`: a card finished leaving the
///   screen. Emitted after the deck has advanced.
/// - `state_changed(DeckState)`: the deck moved to a new state. For a
///   completed swipe this fires before the swipe signal.
/// - `exhausted(())`: the last card was swiped, or empty data was set. Also
///   fires before the swipe signal of the last card.
pub struct Deck<T> {
    config: DeckConfig,
    data: Arc<Property<Arc<[T]>>>,
    index: Arc<Property<usize>>,
    state: Arc<Property<DeckState>>,
    position: AnimatedValueXY,
    layout_shift: AnimatedValueXY,
    recognizer: SwipeRecognizer,
    fling: Option<PendingFling>,
    /// Bumped on every data replacement and on teardown.
    generation: u64,
    torn_down: bool,

    /// Signal emitted with the item swiped off to the left.
    pub swiped_left: Signal<T>,
    /// Signal emitted with the item swiped off to the right.
    pub swiped_right: Signal<T>,
    /// Signal emitted when the deck changes state.
    pub state_changed: Signal<DeckState>,
    /// Signal emitted when no cards remain.
    pub exhausted: Signal<()>,
}

impl<T> Deck<T>
where
    T: DeckItem + Clone + Send + Sync + 'static,
{
    /// Create a deck showing `data` from the first item.
    pub fn new(data: Arc<[T]>, config: DeckConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid deck configuration: {config:?}");

        let empty = data.is_empty();
        let mut recognizer = SwipeRecognizer::new(SwipePolicy::for_screen_width(config.viewport_width));
        recognizer.set_enabled(!empty);

        tracing::debug!(target: targets::DECK, len = data.len(), ?config, "deck created");
        Self {
            config,
            data: Arc::new(Property::new(data)),
            index: Arc::new(Property::new(0)),
            state: Arc::new(Property::new(DeckState::settled(empty))),
            position: AnimatedValueXY::new(Point::ZERO),
            layout_shift: AnimatedValueXY::new(Point::ZERO),
            recognizer,
            fling: None,
            generation: 0,
            torn_down: false,
            swiped_left: Signal::new(),
            swiped_right: Signal::new(),
            state_changed: Signal::new(),
            exhausted: Signal::new(),
        }
    }

    /// Create a deck for a viewport of `viewport_width` with default settings.
    pub fn with_defaults(data: Arc<[T]>, viewport_width: f32) -> Self {
        Self::new(data, DeckConfig::new(viewport_width))
    }

    /// The configuration the deck was built with.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// The current data.
    pub fn data(&self) -> Arc<[T]> {
        self.data.get()
    }

    /// Index of the top card. Equal to the data length once exhausted.
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// The current state.
    pub fn state(&self) -> DeckState {
        self.state.get()
    }

    /// Displacement of the top card from its resting origin.
    pub fn position(&self) -> Point {
        self.position.value()
    }

    /// Whether every card has been swiped.
    pub fn is_exhausted(&self) -> bool {
        self.index() >= self.data.with(|data| data.len())
    }

    /// The item on the top card.
    pub fn top_item(&self) -> Option<T> {
        let index = self.index();
        self.data.with(|data| data.get(index).cloned())
    }

    /// Extra vertical offset currently applied to every card while the stack
    /// slides into place.
    pub fn layout_offset(&self) -> f32 {
        self.layout_shift.value().y
    }

    /// Whether a card or layout animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.position.is_animating() || self.layout_shift.is_animating()
    }

    /// A live view of the top card's transform.
    pub fn top_card_style(
        &self,
    ) -> Derived<CardTransform, impl Fn(Point) -> CardTransform + Clone + Send + Sync + use<T>> {
        let width = self.config.viewport_width;
        self.position
            .derive(move |position| CardTransform::for_position(position, width))
    }

    /// A cloneable read-only view of the deck's state.
    ///
    /// Slots connected to the deck's signals can capture an observer to read
    /// the already-advanced state during emission.
    pub fn observer(&self) -> DeckObserver<T> {
        DeckObserver {
            data: PropertyReader::new(Arc::clone(&self.data)),
            index: PropertyReader::new(Arc::clone(&self.index)),
            state: PropertyReader::new(Arc::clone(&self.state)),
            position: self.position.reader(),
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a pointer event routed to the top card.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if event.phase == PointerPhase::Down && !self.state().accepts_swipe() {
            tracing::trace!(target: targets::DECK, state = ?self.state(), "pointer-down ignored");
            return false;
        }

        let Some(update) = self.recognizer.process(event) else {
            return false;
        };

        match update {
            GestureUpdate::Claimed(_) => {
                if let Some(token) = self.position.stop() {
                    tracing::trace!(target: targets::DECK, token = token.get(), "snap-back interrupted");
                }
                self.set_state(DeckState::Dragging);
            }
            GestureUpdate::Moved { displacement, .. } => {
                self.position.set(displacement);
            }
            GestureUpdate::Ended { classification, .. } => {
                self.on_terminal(classification, event.timestamp);
            }
        }
        true
    }

    /// Swipe the top card off in `direction` as if the user had dragged it.
    ///
    /// Accepted while idle or springing back. Returns `false` and does
    /// nothing while a drag or fling is in progress, or when no cards remain.
    pub fn force_swipe(&mut self, direction: SwipeDirection, now: Instant) -> bool {
        let state = self.state();
        if self.torn_down || !state.accepts_swipe() {
            tracing::debug!(target: targets::DECK, ?direction, ?state, "force_swipe ignored");
            return false;
        }

        self.recognizer.reset();
        self.fling_out(direction, now);
        true
    }

    fn on_terminal(&mut self, classification: SwipeClassification, now: Instant) {
        match classification.direction() {
            Some(direction) => self.fling_out(direction, now),
            None => self.snap_back(now),
        }
    }

    fn fling_out(&mut self, direction: SwipeDirection, now: Instant) {
        let target = Point::new(direction.sign() * self.config.viewport_width, 0.0);
        let token = self.position.animate_to(
            target,
            AnimationSpec::timed(SWIPE_OUT_DURATION, SWIPE_OUT_EASING),
            now,
        );
        self.fling = Some(PendingFling {
            token,
            direction,
            generation: self.generation,
        });
        tracing::debug!(target: targets::DECK, index = self.index(), ?direction, "fling-out started");
        self.set_state(DeckState::FlingingOut(direction));
    }

    fn snap_back(&mut self, now: Instant) {
        self.position
            .animate_to(Point::ZERO, AnimationSpec::spring(SNAP_BACK_SPRING), now);
        self.set_state(DeckState::SpringingBack);
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance animations to `now` and return the resulting state.
    pub fn tick(&mut self, now: Instant) -> DeckState {
        let _span = PerfSpan::new("deck_tick");

        self.layout_shift.tick(now);

        match self.position.tick(now) {
            AnimationStatus::Idle | AnimationStatus::Running(_) => {}
            AnimationStatus::Completed(token) => self.on_animation_completed(token, now),
        }
        self.state()
    }

    fn on_animation_completed(&mut self, token: AnimationToken, now: Instant) {
        match self.state() {
            DeckState::FlingingOut(_) => {
                let generation = self.generation;
                match self
                    .fling
                    .take_if(|fling| fling.token == token && fling.generation == generation)
                {
                    Some(fling) => self.complete_swipe(fling.direction, now),
                    None => tracing::debug!(target: targets::DECK, token = token.get(), "stale fling completion dropped"),
                }
            }
            DeckState::SpringingBack => {
                tracing::trace!(target: targets::DECK, "snap-back settled");
                self.set_state(DeckState::Idle);
            }
            state => {
                tracing::trace!(target: targets::DECK, ?state, token = token.get(), "unexpected completion ignored");
            }
        }
    }

    fn complete_swipe(&mut self, direction: SwipeDirection, now: Instant) {
        let index = self.index();
        let (item, len) = self.data.with(|data| (data.get(index).cloned(), data.len()));
        let Some(item) = item else {
            tracing::debug!(target: targets::DECK, index, "fling completed without a top card");
            self.set_state(DeckState::settled(true));
            return;
        };

        self.position.set(Point::ZERO);
        self.index.set(index + 1);

        let exhausted = index + 1 >= len;
        self.recognizer.set_enabled(!exhausted);
        if self.config.layout_animation && !exhausted {
            self.layout_shift.set(Point::new(0.0, STACK_INSET_PER_DEPTH));
            self.layout_shift
                .animate_to(Point::ZERO, AnimationSpec::spring(LAYOUT_SHIFT_SPRING), now);
        }

        tracing::debug!(target: targets::DECK, index = index + 1, ?direction, "card swiped");
        self.set_state(DeckState::settled(exhausted));

        match direction {
            SwipeDirection::Left => self.swiped_left.emit(item),
            SwipeDirection::Right => self.swiped_right.emit(item),
        };
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the deck's data.
    ///
    /// A different allocation restarts the deck from the first item,
    /// cancelling any drag or animation in progress. The same allocation is
    /// a no-op. Returns `true` if the deck was reset.
    pub fn set_data(&mut self, data: Arc<[T]>) -> bool {
        if self.torn_down {
            tracing::debug!(target: targets::DECK, "set_data after teardown ignored");
            return false;
        }
        if self.data.with(|current| Arc::ptr_eq(current, &data)) {
            tracing::trace!(target: targets::DECK, "set_data with identical data");
            return false;
        }

        self.generation += 1;
        self.cancel_motion();

        let empty = data.is_empty();
        tracing::debug!(target: targets::DECK, len = data.len(), generation = self.generation, "data replaced");
        self.data.set_silent(data);
        self.index.set(0);
        self.recognizer.set_enabled(!empty);
        self.set_state(DeckState::settled(empty));
        true
    }

    fn cancel_motion(&mut self) {
        self.fling = None;
        self.recognizer.reset();
        self.position.set(Point::ZERO);
        self.layout_shift.set(Point::ZERO);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Build the frame the host should draw.
    pub fn render<R>(&self, renderer: &R) -> DeckFrame<T::Key, R::Output>
    where
        R: CardRenderer<T>,
    {
        let data = self.data();
        let index = self.index();
        if index >= data.len() {
            return DeckFrame::Placeholder(renderer.render_no_more_cards());
        }

        let top = CardTransform::for_position(self.position(), self.config.viewport_width);
        let layout_offset = self.layout_offset();

        let cards = data
            .iter()
            .enumerate()
            .skip(index)
            .rev()
            .map(|(card_index, item)| {
                let depth = card_index - index;
                let style = if depth == 0 {
                    CardStyle::Animated(top)
                } else {
                    CardStyle::stacked(depth)
                };
                RenderedCard {
                    key: CardKey::for_item(item, card_index),
                    index: card_index,
                    depth,
                    style,
                    layout_offset,
                    interactive: depth == 0,
                    content: renderer.render_card(item),
                }
            })
            .collect();
        DeckFrame::Cards(cards)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Stop all animation, detach input and disconnect every signal.
    ///
    /// A torn-down deck still renders but ignores input, ticks and data.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.generation += 1;
        self.fling = None;
        self.position.stop();
        self.layout_shift.stop();
        self.recognizer.set_enabled(false);

        self.swiped_left.disconnect_all();
        self.swiped_right.disconnect_all();
        self.state_changed.disconnect_all();
        self.exhausted.disconnect_all();
        tracing::debug!(target: targets::DECK, index = self.index(), "deck torn down");
    }

    /// Whether [`teardown`](Self::teardown) has been called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Record `next` without notifying. Returns `true` if the state changed.
    fn enter(&self, next: DeckState) -> bool {
        match self.state.replace(next) {
            Some(previous) => {
                tracing::trace!(target: targets::DECK, from = ?previous, to = ?next, "state transition");
                true
            }
            None => false,
        }
    }

    fn notify_state(&self, state: DeckState) {
        self.state_changed.emit(state);
        if state == DeckState::Exhausted {
            self.exhausted.emit(());
        }
    }

    fn set_state(&self, next: DeckState) {
        if self.enter(next) {
            self.notify_state(next);
        }
    }
}

impl<T> Drop for Deck<T> {
    fn drop(&mut self) {
        self.fling = None;
        self.position.stop();
        self.layout_shift.stop();
        tracing::trace!(target: targets::DECK, torn_down = self.torn_down, "deck dropped");
    }
}

impl<T> fmt::Debug for Deck<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("config", &self.config)
            .field("len", &self.data.with(|data| data.len()))
            .field("index", &self.index.get())
            .field("state", &self.state.get())
            .field("position", &self.position.value())
            .finish_non_exhaustive()
    }
}

/// Read-only view of a [`Deck`]'s state.
pub struct DeckObserver<T> {
    data: PropertyReader<Arc<[T]>>,
    index: PropertyReader<usize>,
    state: PropertyReader<DeckState>,
    position: PropertyReader<Point>,
}

impl<T: Clone> DeckObserver<T> {
    /// The deck's current data.
    pub fn data(&self) -> Arc<[T]> {
        self.data.get()
    }

    /// Index of the top card.
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// The deck's state.
    pub fn state(&self) -> DeckState {
        self.state.get()
    }

    /// Displacement of the top card.
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// The item on the top card.
    pub fn top_item(&self) -> Option<T> {
        let index = self.index();
        self.data.with(|data| data.get(index).cloned())
    }
}

impl<T> Clone for DeckObserver<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            index: self.index.clone(),
            state: self.state.clone(),
            position: self.position.clone(),
        }
    }
}

impl<T> fmt::Debug for DeckObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckObserver")
            .field("index", &self.index.get())
            .field("state", &self.state.get())
            .field("position", &self.position.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    use crate::render::render_fns;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(u32);

    impl DeckItem for Card {
        type Key = u32;

        fn key(&self) -> Option<u32> {
            Some(self.0)
        }
    }

    static_assertions::assert_impl_all!(Deck<Card>: Send, Sync);
    static_assertions::assert_impl_all!(DeckObserver<Card>: Send, Sync);

    const FRAME: Duration = Duration::from_millis(16);

    fn cards(ids: &[u32]) -> Arc<[Card]> {
        ids.iter().copied().map(Card).collect()
    }

    fn deck(ids: &[u32]) -> Deck<Card> {
        Deck::with_defaults(cards(ids), 400.0)
    }

    /// Drag the top card by `dx` and release; returns the release time.
    fn drag(deck: &mut Deck<Card>, dx: f32, start: Instant) -> Instant {
        let origin = Point::new(200.0, 300.0);
        let end = Point::new(origin.x + dx, origin.y);
        deck.handle_pointer(&PointerEvent::down(1, origin, start));
        deck.handle_pointer(&PointerEvent::moved(1, end, start + FRAME));
        let release = start + FRAME * 2;
        deck.handle_pointer(&PointerEvent::up(1, end, release));
        release
    }

    fn settle(deck: &mut Deck<Card>, mut now: Instant) -> Instant {
        for _ in 0..1000 {
            now += FRAME;
            deck.tick(now);
            if !deck.is_animating() {
                break;
            }
        }
        now
    }

    fn recorder<A: Clone + Send + 'static>(signal: &Signal<A>) -> Arc<Mutex<Vec<A>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        signal.connect(move |args: &A| sink.lock().push(args.clone()));
        log
    }

    #[test]
    fn test_initial_state() {
        let deck = deck(&[1, 2, 3]);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.top_item(), Some(Card(1)));

        let empty = Deck::<Card>::with_defaults(cards(&[]), 400.0);
        assert_eq!(empty.state(), DeckState::Exhausted);
        assert!(empty.is_exhausted());
    }

    #[test]
    fn test_drag_writes_raw_offset() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        assert!(deck.handle_pointer(&PointerEvent::down(1, Point::new(10.0, 10.0), t0)));
        assert_eq!(deck.state(), DeckState::Dragging);

        deck.handle_pointer(&PointerEvent::moved(1, Point::new(70.0, 25.0), t0 + FRAME));
        assert_eq!(deck.position(), Point::new(60.0, 15.0));
        assert!((deck.top_card_style().get().rotation_degrees - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_drag_springs_back() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2, 3]);
        let right = recorder(&deck.swiped_right);

        let release = drag(&mut deck, 80.0, t0);
        assert_eq!(deck.state(), DeckState::SpringingBack);

        settle(&mut deck, release);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.position(), Point::ZERO);
        assert_eq!(deck.index(), 0);
        assert!(right.lock().is_empty());
    }

    #[test]
    fn test_swipe_right_advances_then_emits() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2, 3]);
        let observer = deck.observer();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        deck.swiped_right.connect(move |card: &Card| {
            sink.lock().push((card.clone(), observer.index(), observer.position()));
        });

        let release = drag(&mut deck, 150.0, t0);
        assert_eq!(deck.state(), DeckState::FlingingOut(SwipeDirection::Right));

        deck.tick(release + Duration::from_millis(100));
        assert_eq!(deck.index(), 0);
        assert!(seen.lock().is_empty());

        deck.tick(release + SWIPE_OUT_DURATION);
        assert_eq!(*seen.lock(), vec![(Card(1), 1, Point::ZERO)]);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.top_item(), Some(Card(2)));
    }

    #[test]
    fn test_pointer_down_ignored_while_flinging() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        let release = drag(&mut deck, -150.0, t0);

        assert!(!deck.handle_pointer(&PointerEvent::down(2, Point::ZERO, release + FRAME)));
        assert_eq!(deck.state(), DeckState::FlingingOut(SwipeDirection::Left));
    }

    #[test]
    fn test_pointer_down_interrupts_snap_back() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        let release = drag(&mut deck, 60.0, t0);
        deck.tick(release + FRAME);
        assert_eq!(deck.state(), DeckState::SpringingBack);

        assert!(deck.handle_pointer(&PointerEvent::down(1, Point::ZERO, release + FRAME * 2)));
        assert_eq!(deck.state(), DeckState::Dragging);
        assert!(!deck.is_animating());
    }

    #[test]
    fn test_cancelled_pointer_springs_back() {
        let t0 = Instant::now();
        let mut deck = deck(&[1]);
        deck.handle_pointer(&PointerEvent::down(1, Point::ZERO, t0));
        deck.handle_pointer(&PointerEvent::moved(1, Point::new(300.0, 0.0), t0 + FRAME));
        deck.handle_pointer(&PointerEvent::cancelled(1, Point::new(300.0, 0.0), t0 + FRAME * 2));
        assert_eq!(deck.state(), DeckState::SpringingBack);

        settle(&mut deck, t0 + FRAME * 2);
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.position(), Point::ZERO);
    }

    #[test]
    fn test_force_swipe() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        let left = recorder(&deck.swiped_left);

        assert!(deck.force_swipe(SwipeDirection::Left, t0));
        assert!(!deck.force_swipe(SwipeDirection::Right, t0));
        deck.tick(t0 + SWIPE_OUT_DURATION);
        assert_eq!(*left.lock(), vec![Card(1)]);

        deck.handle_pointer(&PointerEvent::down(1, Point::ZERO, t0 + SWIPE_OUT_DURATION));
        assert!(!deck.force_swipe(SwipeDirection::Left, t0 + SWIPE_OUT_DURATION));
    }

    #[test]
    fn test_last_swipe_exhausts() {
        let t0 = Instant::now();
        let mut deck = deck(&[1]);
        let states = recorder(&deck.state_changed);
        let exhausted = recorder(&deck.exhausted);

        deck.force_swipe(SwipeDirection::Right, t0);
        deck.tick(t0 + SWIPE_OUT_DURATION);

        assert_eq!(deck.state(), DeckState::Exhausted);
        assert_eq!(
            *states.lock(),
            vec![DeckState::FlingingOut(SwipeDirection::Right), DeckState::Exhausted]
        );
        assert_eq!(exhausted.lock().len(), 1);
        assert!(!deck.handle_pointer(&PointerEvent::down(1, Point::ZERO, t0)));
        assert!(!deck.force_swipe(SwipeDirection::Left, t0));

        let frame = deck.render(&render_fns(|c: &Card| c.0, || 0));
        assert_eq!(frame, DeckFrame::Placeholder(0));
    }

    /// Shared buffer the fmt subscriber writes into.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_swipe_logged_under_deck_target() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        tracing::subscriber::with_default(subscriber, || {
            deck.force_swipe(SwipeDirection::Left, t0);
            deck.tick(t0 + SWIPE_OUT_DURATION);
        });

        let output = String::from_utf8_lossy(&logs.0.lock()).into_owned();
        assert!(output.contains(targets::DECK), "missing deck target:\n{output}");
        assert!(output.contains("fling-out started"));
        assert!(output.contains("card swiped"));
        assert!(output.contains("deck_tick"), "missing tick span:\n{output}");
    }

    #[test]
    fn test_exhausted_reported_when_last_swipe_slot_panics() {
        let t0 = Instant::now();
        let mut deck = deck(&[1]);
        let states = recorder(&deck.state_changed);
        let exhausted = recorder(&deck.exhausted);
        deck.swiped_right.connect(|_: &Card| panic!("slot failed"));

        deck.force_swipe(SwipeDirection::Right, t0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            deck.tick(t0 + SWIPE_OUT_DURATION);
        }));

        assert!(result.is_err());
        assert_eq!(deck.state(), DeckState::Exhausted);
        assert_eq!(states.lock().last(), Some(&DeckState::Exhausted));
        assert_eq!(exhausted.lock().len(), 1);
    }

    #[test]
    fn test_set_data_identity() {
        let t0 = Instant::now();
        let data = cards(&[1, 2, 3]);
        let mut deck = Deck::with_defaults(Arc::clone(&data), 400.0);
        deck.force_swipe(SwipeDirection::Right, t0);
        deck.tick(t0 + SWIPE_OUT_DURATION);
        assert_eq!(deck.index(), 1);

        assert!(!deck.set_data(Arc::clone(&data)));
        assert_eq!(deck.index(), 1);

        // Equal contents, different allocation.
        assert!(deck.set_data(cards(&[1, 2, 3])));
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn test_set_data_mid_fling_suppresses_completion() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2, 3]);
        let right = recorder(&deck.swiped_right);

        let release = drag(&mut deck, 150.0, t0);
        deck.tick(release + Duration::from_millis(100));
        deck.set_data(cards(&[7, 8]));

        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.position(), Point::ZERO);
        settle(&mut deck, release + Duration::from_millis(100));
        assert!(right.lock().is_empty());
        assert_eq!(deck.top_item(), Some(Card(7)));
    }

    #[test]
    fn test_render_orders_bottom_to_top() {
        let t0 = Instant::now();
        let mut deck = Deck::new(cards(&[1, 2, 3, 4]), DeckConfig::new(400.0).with_layout_animation(false));
        deck.force_swipe(SwipeDirection::Left, t0);
        deck.tick(t0 + SWIPE_OUT_DURATION);

        let frame = deck.render(&render_fns(|c: &Card| c.0, || 0));
        let rendered: Vec<_> = frame.cards().iter().map(|c| (c.key.clone(), c.depth, c.interactive)).collect();
        assert_eq!(
            rendered,
            vec![
                (CardKey::Item(4), 2, false),
                (CardKey::Item(3), 1, false),
                (CardKey::Item(2), 0, true),
            ]
        );
        assert_eq!(frame.cards()[0].style, CardStyle::Stacked { inset: 10.0 });
        assert_eq!(frame.top_card().map(|c| c.style), Some(CardStyle::Animated(CardTransform::IDENTITY)));
        assert!(frame.cards().iter().all(|c| c.layout_offset == 0.0));
    }

    #[test]
    fn test_layout_shift_slides_stack_up() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2, 3]);
        deck.force_swipe(SwipeDirection::Right, t0);
        let done = t0 + SWIPE_OUT_DURATION;
        deck.tick(done);

        assert_eq!(deck.layout_offset(), STACK_INSET_PER_DEPTH);
        let frame = deck.render(&render_fns(|c: &Card| c.0, || 0));
        assert!(frame.cards().iter().all(|c| c.layout_offset == STACK_INSET_PER_DEPTH));

        settle(&mut deck, done);
        assert_eq!(deck.layout_offset(), 0.0);
    }

    #[test]
    fn test_teardown_detaches() {
        let t0 = Instant::now();
        let mut deck = deck(&[1, 2]);
        let right = recorder(&deck.swiped_right);
        let release = drag(&mut deck, 150.0, t0);

        deck.teardown();
        assert!(deck.is_torn_down());
        assert_eq!(deck.swiped_right.connection_count(), 0);
        deck.tick(release + SWIPE_OUT_DURATION);
        assert!(right.lock().is_empty());
        assert_eq!(deck.index(), 0);
        assert!(!deck.handle_pointer(&PointerEvent::down(1, Point::ZERO, t0)));
        assert!(!deck.force_swipe(SwipeDirection::Left, t0));
        assert!(!deck.set_data(cards(&[5])));
    }
}

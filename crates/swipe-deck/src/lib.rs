//! A swipeable card deck.
//!
//! swipe-deck shows a stack of cards built from a list of items. The user
//! drags the top card; releasing it beyond a quarter of the screen width
//! flings it off that side and reports the item, anything shorter springs it
//! back. The next card then moves to the top. Once every card is gone the
//! deck shows a placeholder.
//!
//! The deck is toolkit-agnostic and runs on explicit time:
//!
//! - feed pointer events for the top card to [`Deck::handle_pointer`]
//!   (or convert winit touches with the [`touch`] module),
//! - call [`Deck::tick`] once per frame,
//! - draw the [`DeckFrame`] returned by [`Deck::render`].
//!
//! # Crate Organization
//!
//! - [`gesture`]: pointer events and swipe classification
//! - [`deck`]: the stack controller and its state machine
//! - [`style`]: rotation and stacking of rendered cards
//! - [`render`]: frames handed to the host
//! - [`config`]: deck configuration, loadable from TOML
//! - [`constants`]: swipe, fling and spring tuning
//!
//! # Logging
//!
//! Events are emitted through `tracing` under the targets in
//! [`swipe_deck_core::logging::targets`], at `debug` and `trace` only.

pub mod config;
pub mod constants;
pub mod deck;
mod error;
pub mod gesture;
mod item;
pub mod render;
pub mod style;

#[cfg(feature = "winit")]
pub mod touch;

pub use config::DeckConfig;
pub use deck::{Deck, DeckObserver, DeckState};
pub use error::{DeckError, DeckResult};
pub use gesture::{PointerEvent, PointerPhase, SwipeClassification, SwipeDirection};
pub use item::{CardKey, DeckItem};
pub use render::{CardRenderer, DeckFrame, RenderedCard, render_fns};
pub use style::{CardStyle, CardTransform};

pub use swipe_deck_core::{Point, Signal};

//! Core systems for swipe-deck.
//!
//! This crate provides the toolkit-independent building blocks the deck is
//! assembled from:
//!
//! - **Geometry**: [`Point`], a 2-D value convertible to and from `glam`
//! - **Signal/Slot System**: [`Signal`] for notifying the host application
//! - **Property System**: [`Property`] cells with change detection and
//!   shareable read-only views
//! - **Animation**: [`animation::AnimatedValueXY`], an animatable 2-D value
//!   driven by timed and spring transitions
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use swipe_deck_core::Signal;
//!
//! let swiped = Signal::<String>::new();
//! let conn_id = swiped.connect(|item| {
//!     println!("swiped: {}", item);
//! });
//!
//! swiped.emit("card-a".to_string());
//! swiped.disconnect(conn_id);
//! ```
//!
//! # Animation Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use swipe_deck_core::Point;
//! use swipe_deck_core::animation::{AnimatedValueXY, AnimationSpec, AnimationStatus, Easing};
//!
//! let start = Instant::now();
//! let mut position = AnimatedValueXY::new(Point::ZERO);
//! let token = position.animate_to(
//!     Point::new(400.0, 0.0),
//!     AnimationSpec::timed(Duration::from_millis(250), Easing::EaseInOut),
//!     start,
//! );
//!
//! let status = position.tick(start + Duration::from_millis(250));
//! assert_eq!(status, AnimationStatus::Completed(token));
//! assert_eq!(position.value(), Point::new(400.0, 0.0));
//! ```

pub mod animation;
mod geometry;
pub mod logging;
pub mod property;
pub mod signal;

pub use geometry::Point;
pub use logging::PerfSpan;
pub use property::{Property, PropertyReader};
pub use signal::{ConnectionId, Signal};

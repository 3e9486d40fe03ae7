//! Conversion of winit touch events into deck pointer events.
//!
//! ```ignore
//! use std::time::Instant;
//! use swipe_deck::touch::pointer_event_from_touch;
//!
//! // In the winit event loop:
//! WindowEvent::Touch(touch) => {
//!     deck.handle_pointer(&pointer_event_from_touch(&touch, Instant::now()));
//! }
//! ```

use std::time::Instant;

use winit::event::{Touch, TouchPhase as WinitTouchPhase};

use swipe_deck_core::Point;

use crate::gesture::{PointerEvent, PointerPhase};

/// Converts a winit TouchPhase to a deck PointerPhase.
pub fn from_winit_touch_phase(phase: WinitTouchPhase) -> PointerPhase {
    match phase {
        WinitTouchPhase::Started => PointerPhase::Down,
        WinitTouchPhase::Moved => PointerPhase::Moved,
        WinitTouchPhase::Ended => PointerPhase::Up,
        WinitTouchPhase::Cancelled => PointerPhase::Cancelled,
    }
}

/// Converts a winit Touch into a deck PointerEvent stamped with `timestamp`.
///
/// The touch location is taken as-is; hosts with a scale factor should
/// convert to logical pixels first.
pub fn pointer_event_from_touch(touch: &Touch, timestamp: Instant) -> PointerEvent {
    PointerEvent::new(
        touch.id,
        from_winit_touch_phase(touch.phase),
        Point::new(touch.location.x as f32, touch.location.y as f32),
        timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_phase_conversion() {
        assert_eq!(from_winit_touch_phase(WinitTouchPhase::Started), PointerPhase::Down);
        assert_eq!(from_winit_touch_phase(WinitTouchPhase::Moved), PointerPhase::Moved);
        assert_eq!(from_winit_touch_phase(WinitTouchPhase::Ended), PointerPhase::Up);
        assert_eq!(from_winit_touch_phase(WinitTouchPhase::Cancelled), PointerPhase::Cancelled);
    }
}

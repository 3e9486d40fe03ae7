//! Signal/slot system for swipe-deck.
//!
//! A [`Signal<Args>`] keeps a set of connected slots (closures) and invokes
//! each of them when the signal is emitted. The deck uses signals to tell the
//! host application that a card was swiped.
//!
//! Slots run synchronously on the emitting thread, which for the deck is the
//! host's UI event loop. The slot list is snapshotted before invocation, so a
//! slot may connect, disconnect or emit other signals without deadlocking,
//! and a panicking slot leaves the signal usable.
//!
//! # Example
//!
//! ```
//! use swipe_deck_core::Signal;
//!
//! let swiped_right = Signal::<u32>::new();
//! let conn_id = swiped_right.connect(|id| {
//!     println!("liked card {}", id);
//! });
//!
//! swiped_right.emit(7);
//! assert!(swiped_right.disconnect(conn_id));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// With no connections, [`emit`](Self::emit) is a no-op.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking every connected slot.
    ///
    /// Returns the number of slots that were invoked.
    #[tracing::instrument(skip_all, target = "swipe_deck_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        // Snapshot so slots can re-enter this signal.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

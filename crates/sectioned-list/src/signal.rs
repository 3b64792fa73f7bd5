//! Signal/slot notifications.
//!
//! A small, type-safe signal mechanism used by the list engine to notify
//! hosts about reloads, clicks, and selection changes. Slots are invoked
//! directly on the emitting thread; the engine is single-threaded and
//! event-driven, so there is no queued dispatch.
//!
//! # Example
//!
//! ```
//! use sectioned_list::Signal;
//!
//! let reloaded = Signal::<usize>::new();
//! let id = reloaded.connect(|count| {
//!     println!("list now holds {count} items");
//! });
//! reloaded.emit(4);
//! reloaded.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`]
    /// to remove the connection.
    pub struct ConnectionId;
}

/// A type-safe signal with multiple connected slots.
///
/// Emitting the signal invokes every connected slot with a reference to
/// the emitted arguments; invocation order is unspecified. Use `()` for
/// argument-less signals or a tuple for several arguments.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Arc<dyn Fn(&Args) + Send + Sync>>>,
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Creates a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnects a previously connected slot.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnects all slots.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Temporarily blocks or unblocks emission.
    ///
    /// Returns the previous blocked state. While blocked, `emit` drops
    /// the arguments without invoking any slot.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::SeqCst)
    }

    /// Emits the signal, invoking every connected slot.
    ///
    /// Slots are cloned out of the lock before invocation so a slot may
    /// connect or disconnect without deadlocking.
    pub fn emit(&self, args: Args) {
        if self.blocked.load(Ordering::SeqCst) {
            return;
        }
        let slots: Vec<_> = self.connections.lock().values().cloned().collect();
        for slot in slots {
            slot(&args);
        }
    }
}

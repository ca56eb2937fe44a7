//! State Hub
//!
//! The hub is the sole channel between controls and displays within one
//! context. It owns a keyed store of the latest value per parameter and an
//! explicit list of subscribers notified on every change.
//!
//! # How broadcasts work
//!
//! 1. `modify` writes the signal's value at its key.
//!
//! 2. The full storage snapshot is cloned once and handed to every
//!    subscriber, synchronously, in subscription order.
//!
//! 3. Each subscriber decides for itself whether the update warrants a
//!    recomputation (see the display dirty check).
//!
//! The snapshot is cloned *before* subscribers run, so a callback never
//! observes a partially-written store and the storage borrow is released
//! while user code executes.
//!
//! # Ordering and registration discipline
//!
//! Subscribers are notified in the order they subscribed. Context wiring
//! registers every control's initial value before any display subscribes, so
//! no display ever observes a snapshot missing one of its parameters.
//!
//! # Error flow
//!
//! A subscriber error stops the broadcast loop and propagates to the caller
//! of `modify`/`flush`. The storage write has already been committed at that
//! point and is not rolled back; subscribers earlier in the list keep the
//! work they completed, and subscribers later in the list simply miss that
//! one broadcast.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use super::signal::ControlSignal;
use crate::error::Error;
use crate::value::Value;

/// The full key -> value mapping delivered to subscribers on every change.
pub type Snapshot = IndexMap<String, Value>;

/// A consumer of hub broadcasts.
///
/// Implemented by displays; test probes implement it directly.
pub trait Subscribe {
    /// Diagnostic identifier of the subscriber.
    fn identifier(&self) -> &str;

    /// React to one broadcast snapshot.
    ///
    /// Implementations must tolerate snapshots carrying more keys than they
    /// declare interest in.
    fn on_snapshot(&self, snapshot: &Snapshot) -> Result<(), Error>;
}

/// Keyed store plus broadcaster linking controls to displays.
///
/// One hub lives exactly as long as its owning context. Storage is mutated
/// only through [`StateHub::register`] and [`StateHub::modify`] and read
/// only through full-snapshot broadcasts.
#[derive(Default)]
pub struct StateHub {
    storage: RefCell<Snapshot>,
    subscribers: RefCell<Vec<Rc<dyn Subscribe>>>,
}

impl StateHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a control's initial state, failing fast on key collisions.
    ///
    /// Called once per control at bind time, before any display subscribes.
    /// A second control claiming an existing key is a configuration error
    /// raised here, never a silent overwrite at first signal.
    pub fn register(&self, signal: ControlSignal) -> Result<(), Error> {
        if self.storage.borrow().contains_key(signal.key()) {
            return Err(Error::DuplicateKey(signal.key().to_owned()));
        }
        tracing::debug!(key = signal.key(), "registering control state");
        self.modify(signal)
    }

    /// Merge one signal into storage and broadcast the new snapshot.
    pub fn modify(&self, signal: ControlSignal) -> Result<(), Error> {
        let (key, value) = signal.into_parts();
        tracing::trace!(key = key.as_str(), %value, "state modified");
        self.storage.borrow_mut().insert(key, value);
        self.broadcast()
    }

    /// Re-broadcast the current snapshot without mutating storage.
    ///
    /// Used once after wiring to produce each display's first render. Two
    /// consecutive flushes deliver two identical snapshots and, absent
    /// caching, two render cycles; the hub never deduplicates.
    pub fn flush(&self) -> Result<(), Error> {
        tracing::trace!("flushing state");
        self.broadcast()
    }

    /// Append a subscriber to the notification list.
    pub fn subscribe(&self, subscriber: Rc<dyn Subscribe>) {
        tracing::debug!(identifier = subscriber.identifier(), "subscriber added");
        self.subscribers.borrow_mut().push(subscriber);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Whether a parameter key is present in storage.
    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.borrow().contains_key(key)
    }

    /// Clone of the current storage contents.
    pub fn snapshot(&self) -> Snapshot {
        self.storage.borrow().clone()
    }

    fn broadcast(&self) -> Result<(), Error> {
        let snapshot = self.storage.borrow().clone();
        // Clone the list so subscriber callbacks run without any hub borrow
        // held.
        let subscribers: Vec<Rc<dyn Subscribe>> = self.subscribers.borrow().clone();
        for subscriber in &subscribers {
            subscriber.on_snapshot(&snapshot)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for StateHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHub")
            .field("storage", &self.storage.borrow())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

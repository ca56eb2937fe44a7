//! Control Contract
//!
//! [`Control`] is the producer-side contract consumed by context wiring, and
//! [`ControlCore`] is the shared plumbing every concrete control embeds: the
//! validated key, the diagnostic identifier, the one-shot hub slot, and the
//! emit path. Composition keeps each concrete control in charge of exactly
//! its own value semantics.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::identifier::IdGenerator;
use crate::state::{ControlSignal, StateHub};
use crate::value::Value;

/// A producer of control signals.
///
/// Implementations are constructed detached and wired to exactly one hub by
/// [`configure_hub`](crate::context::configure_hub).
pub trait Control {
    /// The parameter key this control owns.
    fn key(&self) -> &str;

    /// Diagnostic identifier of the control.
    fn identifier(&self) -> &str;

    /// Snapshot of the control's current state as a signal.
    ///
    /// Wiring pushes this into the hub once at bind time to seed initial
    /// state.
    fn current_signal(&self) -> ControlSignal;

    /// Bind the control to a hub. One-shot: binding an already-bound
    /// control is a configuration error.
    fn bind(&self, hub: &Rc<StateHub>) -> Result<(), Error>;
}

/// Shared state and emit path embedded by every concrete control.
pub struct ControlCore {
    key: String,
    identifier: String,
    hub: RefCell<Option<Rc<StateHub>>>,
}

impl ControlCore {
    /// Validate the key and assign a diagnostic identifier.
    pub fn new(ids: &IdGenerator, prefix: &str, key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self {
            key,
            identifier: ids.next_identifier(prefix),
            hub: RefCell::new(None),
        })
    }

    /// The parameter key this control owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Diagnostic identifier of the control.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the control has been wired to a hub.
    pub fn is_bound(&self) -> bool {
        self.hub.borrow().is_some()
    }

    /// Attach the control to its hub. Fails if already bound.
    pub fn bind(&self, hub: &Rc<StateHub>) -> Result<(), Error> {
        let mut slot = self.hub.borrow_mut();
        if slot.is_some() {
            return Err(Error::AlreadyBound(self.identifier.clone()));
        }
        tracing::debug!(
            identifier = self.identifier.as_str(),
            key = self.key.as_str(),
            "control bound"
        );
        *slot = Some(Rc::clone(hub));
        Ok(())
    }

    /// Build a signal for the control's validated key.
    pub fn signal(&self, value: Value) -> ControlSignal {
        ControlSignal::from_parts(self.key.clone(), value)
    }

    /// Forward a new value to the bound hub.
    ///
    /// Emission from a detached control is a silent no-op, mirroring an
    /// interaction on a widget nothing is listening to yet.
    pub fn emit(&self, value: Value) -> Result<(), Error> {
        let hub = self.hub.borrow().clone();
        match hub {
            Some(hub) => hub.modify(self.signal(value)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ControlCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlCore")
            .field("key", &self.key)
            .field("identifier", &self.identifier)
            .field("bound", &self.is_bound())
            .finish()
    }
}

//! Context Wiring
//!
//! The one-time binding procedure that links an arbitrary set of controls
//! and displays to a common hub so that none of the parties involved are
//! aware of the others.
//!
//! # Binding order
//!
//! 1. Every control key is checked for uniqueness up front. Two controls
//!    sharing a key would silently overwrite each other's state, so this
//!    fails loudly before any signal flows.
//!
//! 2. Controls are bound and their initial values registered *before* any
//!    display subscribes. A display therefore never observes a snapshot
//!    missing one of its parameters.
//!
//! 3. Displays subscribe, establishing the broadcast order.
//!
//! 4. One flush primes every display with its first render.
//!
//! Binding is one-shot: a control handed to a second wiring call fails with
//! [`Error::AlreadyBound`] rather than quietly feeding two hubs.

use std::collections::HashSet;
use std::rc::Rc;

use crate::control::Control;
use crate::error::Error;
use crate::state::{StateHub, Subscribe};

/// Wire controls and displays to a common hub and prime the first render.
///
/// Pass `hub` to extend an existing context; its registered keys take part
/// in the duplicate checks. Otherwise a fresh hub is created and returned.
///
/// # Example
///
/// ```rust,ignore
/// let ids = IdGenerator::new();
/// let rho = Rc::new(Trackbar::new(&ids, "rho", TrackbarConfig::with_unit_step(0.0, 100.0)?)?);
/// let view = Rc::new(Display::new(&ids, ["rho"], |args| Ok(args.f64("rho")?), render));
///
/// let hub = configure_hub(&[rho.clone()], &[view.clone()], None)?;
/// // `view` has rendered once; moving the slider re-renders it.
/// ```
pub fn configure_hub(
    controls: &[Rc<dyn Control>],
    displays: &[Rc<dyn Subscribe>],
    hub: Option<Rc<StateHub>>,
) -> Result<Rc<StateHub>, Error> {
    let hub = hub.unwrap_or_else(|| Rc::new(StateHub::new()));

    // Shared keys would overwrite each other in storage; fail before any
    // state flows anywhere.
    let mut keys: HashSet<&str> = HashSet::with_capacity(controls.len());
    for control in controls {
        if !keys.insert(control.key()) {
            return Err(Error::DuplicateKey(control.key().to_owned()));
        }
    }

    for control in controls {
        control.bind(&hub)?;
        hub.register(control.current_signal())?;
    }

    for display in displays {
        hub.subscribe(Rc::clone(display));
    }

    tracing::debug!(
        controls = controls.len(),
        displays = displays.len(),
        "context wired"
    );

    // Every display receives the seeded state exactly once.
    hub.flush()?;
    Ok(hub)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

//! Toggle Control
//!
//! A two-state control. Both states can carry arbitrary values, so a toggle
//! can flip between algorithm variants just as easily as between `true` and
//! `false`. Large values are cloned on every emission; keep them small.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::core::{Control, ControlCore};
use crate::error::Error;
use crate::identifier::IdGenerator;
use crate::state::{ControlSignal, StateHub};
use crate::value::Value;

/// Values and initial state for a [`Toggle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleConfig {
    /// Value emitted in the checked (on) state.
    pub checked: Value,
    /// Value emitted in the unchecked (off) state.
    pub unchecked: Value,
    /// Whether the toggle starts checked.
    pub init_checked: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            checked: Value::Bool(true),
            unchecked: Value::Bool(false),
            init_checked: false,
        }
    }
}

/// A stateful two-state control.
pub struct Toggle {
    core: ControlCore,
    config: ToggleConfig,
    checked: Cell<bool>,
}

impl Toggle {
    /// Create a detached toggle for the given parameter key.
    pub fn new(ids: &IdGenerator, key: &str, config: ToggleConfig) -> Result<Self, Error> {
        let core = ControlCore::new(ids, "toggle", key)?;
        let checked = Cell::new(config.init_checked);
        Ok(Self {
            core,
            config,
            checked,
        })
    }

    /// Whether the toggle is currently checked.
    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// The value associated with the current state.
    pub fn value(&self) -> &Value {
        if self.checked.get() {
            &self.config.checked
        } else {
            &self.config.unchecked
        }
    }

    /// Set the checked state and emit the matching value.
    pub fn set_checked(&self, checked: bool) -> Result<(), Error> {
        self.checked.set(checked);
        self.core.emit(self.value().clone())
    }

    /// Flip the checked state and emit.
    pub fn toggle(&self) -> Result<(), Error> {
        self.set_checked(!self.checked.get())
    }
}

impl Control for Toggle {
    fn key(&self) -> &str {
        self.core.key()
    }

    fn identifier(&self) -> &str {
        self.core.identifier()
    }

    fn current_signal(&self) -> ControlSignal {
        self.core.signal(self.value().clone())
    }

    fn bind(&self, hub: &Rc<StateHub>) -> Result<(), Error> {
        self.core.bind(hub)
    }
}

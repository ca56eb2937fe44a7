//! Trackbar Control
//!
//! A stepped range control for exploring a span of parameter inputs. The
//! configuration describes a discrete value grid `start + i * step`; every
//! incoming value snaps to the nearest grid point and clamps to the range,
//! so a trackbar can only ever emit values that exist on its grid.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::core::{Control, ControlCore};
use crate::error::Error;
use crate::identifier::IdGenerator;
use crate::state::{ControlSignal, StateHub};
use crate::value::Value;

/// Range parameters for a [`Trackbar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackbarConfig {
    start: f64,
    stop: f64,
    step: f64,
    init_index: u64,
}

impl TrackbarConfig {
    /// Build and validate a range configuration.
    ///
    /// `step` must be positive and no larger than the range, and `init`
    /// must fall within `[start, stop]`. The initial position snaps to the
    /// nearest grid point, as any later value does.
    pub fn new(start: f64, stop: f64, step: f64, init: f64) -> Result<Self, Error> {
        let range = stop - start;
        if !(step > 0.0) {
            return Err(Error::InvalidRange(format!(
                "step must be a positive number, received {step}"
            )));
        }
        if step > range {
            return Err(Error::InvalidRange(format!(
                "step value {step} exceeds range {range}"
            )));
        }
        if init < start || init > stop {
            return Err(Error::InvalidRange(format!(
                "initial value {init} does not exist in the range [{start}, {stop}]"
            )));
        }

        let mut config = Self {
            start,
            stop,
            step,
            init_index: 0,
        };
        config.init_index = config.index_of(init);
        Ok(config)
    }

    /// Convenience constructor: unit step, starting at the range minimum.
    pub fn with_unit_step(start: f64, stop: f64) -> Result<Self, Error> {
        Self::new(start, stop, 1.0, start)
    }

    /// Number of grid points in the range.
    pub fn steps(&self) -> u64 {
        ((self.stop - self.start) / self.step).floor() as u64 + 1
    }

    /// Grid value at the given index, clamped to the last grid point.
    pub fn value_at(&self, index: u64) -> f64 {
        let index = index.min(self.steps() - 1);
        self.start + index as f64 * self.step
    }

    /// Index of the grid point nearest to `value`, clamped to the range.
    pub fn index_of(&self, value: f64) -> u64 {
        let clamped = value.clamp(self.start, self.stop);
        let index = ((clamped - self.start) / self.step).round() as u64;
        index.min(self.steps() - 1)
    }

    /// The grid value the trackbar starts on.
    pub fn initial_value(&self) -> f64 {
        self.value_at(self.init_index)
    }
}

/// A stateful range control.
pub struct Trackbar {
    core: ControlCore,
    config: TrackbarConfig,
    index: Cell<u64>,
}

impl Trackbar {
    /// Create a detached trackbar for the given parameter key.
    pub fn new(ids: &IdGenerator, key: &str, config: TrackbarConfig) -> Result<Self, Error> {
        let core = ControlCore::new(ids, "trackbar", key)?;
        let index = Cell::new(config.init_index);
        Ok(Self {
            core,
            config,
            index,
        })
    }

    /// The current grid value.
    pub fn value(&self) -> f64 {
        self.config.value_at(self.index.get())
    }

    /// The range configuration.
    pub fn config(&self) -> &TrackbarConfig {
        &self.config
    }

    /// Move to the grid point nearest `value` and emit the new state.
    pub fn set_value(&self, value: f64) -> Result<(), Error> {
        self.index.set(self.config.index_of(value));
        self.core.emit(Value::Float(self.value()))
    }
}

impl Control for Trackbar {
    fn key(&self) -> &str {
        self.core.key()
    }

    fn identifier(&self) -> &str {
        self.core.identifier()
    }

    fn current_signal(&self) -> ControlSignal {
        self.core.signal(Value::Float(self.value()))
    }

    fn bind(&self, hub: &Rc<StateHub>) -> Result<(), Error> {
        self.core.bind(hub)
    }
}

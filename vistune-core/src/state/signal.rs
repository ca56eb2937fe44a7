//! Control Signals
//!
//! A [`ControlSignal`] is the single unit of change in the system: one
//! parameter key paired with its new value. Controls build one on every
//! interaction; the wiring step builds one per control to seed the hub with
//! initial state.

use crate::error::Error;
use crate::value::Value;

/// One (key, value) state-change event. Immutable once constructed.
///
/// The key names the parameter the emitting control owns. A display whose
/// declared parameter list contains the same name receives the updated value
/// on the next broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSignal {
    key: String,
    value: Value,
}

impl ControlSignal {
    /// Build a signal, rejecting empty keys.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Result<Self, Error> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self {
            key,
            value: value.into(),
        })
    }

    /// Build a signal from a key that was already validated at control
    /// construction.
    pub(crate) fn from_parts(key: String, value: Value) -> Self {
        debug_assert!(!key.is_empty());
        Self { key, value }
    }

    /// The parameter key this signal updates.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The new parameter value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_carries_key_and_value() {
        let signal = ControlSignal::new("rho", 50.0).unwrap();
        assert_eq!(signal.key(), "rho");
        assert_eq!(signal.value(), &Value::Float(50.0));
    }

    #[test]
    fn empty_key_is_rejected() {
        let result = ControlSignal::new("", 1.0);
        assert!(matches!(result, Err(Error::EmptyKey)));
    }

    #[test]
    fn signals_compare_by_content() {
        let a = ControlSignal::new("sigma", 1i64).unwrap();
        let b = ControlSignal::new("sigma", 1i64).unwrap();
        let c = ControlSignal::new("sigma", 2i64).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

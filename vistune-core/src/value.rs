//! State Values
//!
//! Every control publishes its state as a [`Value`], and the hub's storage
//! maps parameter keys to values of this type. The variant set is closed on
//! purpose: the dirty-check engine compares values with `PartialEq`, so
//! everything a control can emit must support a cheap, well-defined
//! comparison.
//!
//! Numeric accessors coerce where the conversion is lossless enough for
//! tuning work (`Int`/`UInt` read as `f64`), so a display callback written
//! against `f64` keeps working when a control emits integer ticks.
//!
//! `Float` follows IEEE equality: a NaN-valued parameter never compares
//! equal to its previous value, so a display tracking it recomputes on every
//! broadcast.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single piece of control state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean state, emitted by toggles in the default configuration.
    Bool(bool),
    /// Signed integer state.
    Int(i64),
    /// Unsigned integer state, emitted by the animator's tick counter.
    UInt(u64),
    /// Floating point state, emitted by trackbars.
    Float(f64),
    /// Text state.
    Str(String),
}

impl Value {
    /// Name of the held variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }

    /// Read as a boolean. `None` for non-boolean variants.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Read as a signed integer. `UInt` values convert when they fit.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Read as an unsigned integer. Non-negative `Int` values convert.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            Value::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Read as a float. Integer variants widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Read as a string slice. `None` for non-text variants.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::UInt(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::UInt(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

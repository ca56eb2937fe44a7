//! Argument Projection
//!
//! A broadcast snapshot usually carries more keys than any single display
//! cares about. [`Args`] is the explicit projection of one snapshot onto a
//! display's declared parameter list: extra keys are dropped by
//! construction, and a declared parameter missing from the snapshot fails
//! the projection before the callback ever runs.
//!
//! Typed getters convert at the access site, so a callback reads
//! `args.f64("rho")?` rather than pattern-matching variants itself.

use indexmap::IndexMap;

use crate::error::Error;
use crate::state::Snapshot;
use crate::value::Value;

/// The declared-parameter view of one snapshot, handed to compute callbacks.
#[derive(Debug)]
pub struct Args<'a> {
    values: IndexMap<&'a str, &'a Value>,
}

impl<'a> Args<'a> {
    /// Project `snapshot` onto `params`, in declaration order.
    pub(crate) fn project(params: &'a [String], snapshot: &'a Snapshot) -> Result<Self, Error> {
        let mut values = IndexMap::with_capacity(params.len());
        for name in params {
            let value = snapshot
                .get(name)
                .ok_or_else(|| Error::MissingParameter(name.clone()))?;
            values.insert(name.as_str(), value);
        }
        Ok(Self { values })
    }

    /// Number of projected parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the display declared no parameters at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of a declared parameter.
    pub fn value(&self, name: &str) -> Result<&Value, Error> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingParameter(name.to_owned()))
    }

    /// Read a declared parameter as a float. Integer variants widen.
    pub fn f64(&self, name: &str) -> Result<f64, Error> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| Error::TypeMismatch {
            key: name.to_owned(),
            expected: "float",
            found: value.type_name(),
        })
    }

    /// Read a declared parameter as a signed integer.
    pub fn i64(&self, name: &str) -> Result<i64, Error> {
        let value = self.value(name)?;
        value.as_i64().ok_or_else(|| Error::TypeMismatch {
            key: name.to_owned(),
            expected: "int",
            found: value.type_name(),
        })
    }

    /// Read a declared parameter as an unsigned integer.
    pub fn u64(&self, name: &str) -> Result<u64, Error> {
        let value = self.value(name)?;
        value.as_u64().ok_or_else(|| Error::TypeMismatch {
            key: name.to_owned(),
            expected: "uint",
            found: value.type_name(),
        })
    }

    /// Read a declared parameter as a boolean.
    pub fn bool(&self, name: &str) -> Result<bool, Error> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| Error::TypeMismatch {
            key: name.to_owned(),
            expected: "bool",
            found: value.type_name(),
        })
    }

    /// Read a declared parameter as a string slice.
    pub fn str(&self, name: &str) -> Result<&str, Error> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| Error::TypeMismatch {
            key: name.to_owned(),
            expected: "str",
            found: value.type_name(),
        })
    }
}

//! Callback Cache
//!
//! The dirty-check engine behind selective recomputation. A cache tracks a
//! subset of its display's declared parameters and answers one question per
//! broadcast: did any tracked parameter change since the last recomputation?
//!
//! # Strategies
//!
//! The tracked subset is derived once at construction from a [`CacheSpec`]:
//!
//! | spec | tracked set |
//! |---|---|
//! | nothing specified | all declared parameters |
//! | `include(list)` | exactly the listed names |
//! | `exclude(list)` | all declared parameters except the listed names |
//! | `exclude_all()` | nothing: the display freezes after its first render |
//!
//! Names that are not declared parameters, or supplying both an include and
//! an exclude list, are construction errors, never deferred to the first
//! broadcast.
//!
//! # First call
//!
//! The first `should_run` always answers yes, so the first frame is never
//! blank. Every later call compares tracked values by inequality; on any
//! difference the recorded values are refreshed and the answer is yes,
//! otherwise state is left untouched and the answer is no.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::Error;
use crate::state::Snapshot;
use crate::value::Value;

/// Exclusion side of a [`CacheSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Exclude {
    /// Stop tracking the listed parameter names.
    Named(Vec<String>),
    /// Track nothing at all. Useful only for static content.
    All,
}

impl Default for Exclude {
    fn default() -> Self {
        Exclude::Named(Vec::new())
    }
}

impl Exclude {
    fn is_empty(&self) -> bool {
        matches!(self, Exclude::Named(names) if names.is_empty())
    }
}

/// Declarative description of which parameters a cache should track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSpec {
    /// Track only these names. Leave empty to track everything not
    /// excluded.
    pub include: Vec<String>,
    /// Names to drop from tracking, or [`Exclude::All`].
    pub exclude: Exclude,
}

impl CacheSpec {
    /// Track every declared parameter.
    pub fn track_all() -> Self {
        Self::default()
    }

    /// Track exactly the listed parameter names.
    pub fn include<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: names.into_iter().map(Into::into).collect(),
            exclude: Exclude::default(),
        }
    }

    /// Track everything except the listed parameter names.
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Vec::new(),
            exclude: Exclude::Named(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Track nothing: the owning display renders once and then freezes.
    pub fn exclude_all() -> Self {
        Self {
            include: Vec::new(),
            exclude: Exclude::All,
        }
    }
}

/// Parameter-subset dirty check owned by a single display.
#[derive(Debug)]
pub struct CallbackCache {
    tracked: SmallVec<[String; 8]>,
    last_seen: IndexMap<String, Value>,
    primed: bool,
}

impl CallbackCache {
    /// Derive the tracked set from `spec`, validated against the display's
    /// declared parameter names.
    pub fn new(spec: CacheSpec, declared: &[String]) -> Result<Self, Error> {
        if !spec.include.is_empty() && !spec.exclude.is_empty() {
            return Err(Error::ConflictingCacheSpec);
        }

        let check = |name: &String| -> Result<(), Error> {
            if declared.iter().any(|p| p == name) {
                Ok(())
            } else {
                Err(Error::UnknownParameter(name.clone()))
            }
        };

        let tracked: SmallVec<[String; 8]> = if !spec.include.is_empty() {
            for name in &spec.include {
                check(name)?;
            }
            spec.include.into_iter().collect()
        } else {
            match spec.exclude {
                Exclude::All => SmallVec::new(),
                Exclude::Named(names) => {
                    for name in &names {
                        check(name)?;
                    }
                    declared
                        .iter()
                        .filter(|p| !names.iter().any(|n| n == *p))
                        .cloned()
                        .collect()
                }
            }
        };

        Ok(Self {
            tracked,
            last_seen: IndexMap::new(),
            primed: false,
        })
    }

    /// The parameter names this cache watches.
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Decide whether the owning display should recompute for `snapshot`.
    pub fn should_run(&mut self, snapshot: &Snapshot) -> bool {
        if !self.primed {
            // Always compute and render the first frame; a blank display on
            // startup is never acceptable.
            self.primed = true;
            self.record(snapshot);
            return true;
        }

        let dirty = self
            .tracked
            .iter()
            .any(|name| snapshot.get(name) != self.last_seen.get(name));
        if dirty {
            self.record(snapshot);
        }
        dirty
    }

    fn record(&mut self, snapshot: &Snapshot) {
        for name in &self.tracked {
            if let Some(value) = snapshot.get(name) {
                self.last_seen.insert(name.clone(), value.clone());
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

//! Error Types
//!
//! Configuration mistakes are surfaced as early as possible: empty keys at
//! signal construction, duplicate keys at bind time, cache strategy problems
//! at cache construction. Failures inside user callbacks are wrapped with
//! the owning display's identifier and propagate out of the hub broadcast
//! unmodified in meaning; storage mutations are never rolled back.

use thiserror::Error;

/// Boxed error type accepted from user-supplied display callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All failure classes produced by the core.
#[derive(Debug, Error)]
pub enum Error {
    /// A control signal was constructed with an empty key.
    #[error("control signal key cannot be empty")]
    EmptyKey,

    /// Two controls share one parameter key within a single hub.
    #[error("detected multiple controls sharing the same parameter key '{0}'")]
    DuplicateKey(String),

    /// A control already wired to one hub was bound a second time.
    #[error("control '{0}' is already bound to a hub")]
    AlreadyBound(String),

    /// A cache strategy referenced a name the callback never declared.
    #[error("callback has no parameter named '{0}'")]
    UnknownParameter(String),

    /// Both an include list and an exclude list were supplied.
    #[error("include and exclude cache strategies are mutually exclusive")]
    ConflictingCacheSpec,

    /// A broadcast snapshot lacks a parameter the display declared.
    #[error("snapshot is missing required parameter '{0}'")]
    MissingParameter(String),

    /// A declared parameter holds a different variant than the callback
    /// asked for.
    #[error("parameter '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The animator was configured with a non-positive update rate.
    #[error("updates per second must be positive, received {0}")]
    InvalidUpdateRate(f64),

    /// A trackbar range configuration is unusable.
    #[error("invalid trackbar range: {0}")]
    InvalidRange(String),

    /// A display's compute callback failed.
    #[error("display '{identifier}' callback failed")]
    Callback {
        identifier: String,
        #[source]
        source: BoxError,
    },
}

//! Display Contract
//!
//! A [`Display`] pairs a pure compute callback with a render sink. On every
//! hub broadcast it consults its cache (if any), projects the snapshot onto
//! its declared parameters, computes, and renders, all synchronously and in
//! that order. Compute and render are individually wrapped by the perf
//! instrumentation layer.
//!
//! Callbacks must be pure functions of their declared parameters. The core
//! does not detect hidden state; a callback that smuggles state defeats the
//! dirty check and earns whatever it renders.

use std::cell::RefCell;

use smallvec::SmallVec;

use super::args::Args;
use super::cache::{CacheSpec, CallbackCache};
use crate::error::{BoxError, Error};
use crate::identifier::IdGenerator;
use crate::perf;
use crate::state::{Snapshot, Subscribe};

/// A consumer of hub broadcasts that recomputes and re-renders on demand.
///
/// `T` is whatever the compute callback produces (an image buffer, plot
/// points, a scalar). The render sink decides what "rendering" means; this
/// core only guarantees when it is called.
pub struct Display<T> {
    identifier: String,
    params: SmallVec<[String; 8]>,
    compute: Box<dyn Fn(&Args<'_>) -> Result<T, BoxError>>,
    render: RefCell<Box<dyn FnMut(T)>>,
    cache: Option<RefCell<CallbackCache>>,
}

impl<T> Display<T> {
    /// Create a display with no cache: every broadcast recomputes.
    pub fn new<I, S, C, R>(ids: &IdGenerator, params: I, compute: C, render: R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: Fn(&Args<'_>) -> Result<T, BoxError> + 'static,
        R: FnMut(T) + 'static,
    {
        Self {
            identifier: ids.next_identifier("display"),
            params: params.into_iter().map(Into::into).collect(),
            compute: Box::new(compute),
            render: RefCell::new(Box::new(render)),
            cache: None,
        }
    }

    /// Create a display whose recomputation is gated by a parameter-subset
    /// dirty check.
    ///
    /// The cache configuration is validated against `params` here, at
    /// construction; a misspelled name never survives to the first
    /// broadcast.
    pub fn with_cache<I, S, C, R>(
        ids: &IdGenerator,
        params: I,
        spec: CacheSpec,
        compute: C,
        render: R,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: Fn(&Args<'_>) -> Result<T, BoxError> + 'static,
        R: FnMut(T) + 'static,
    {
        let params: SmallVec<[String; 8]> = params.into_iter().map(Into::into).collect();
        let cache = CallbackCache::new(spec, &params)?;
        Ok(Self {
            identifier: ids.next_identifier("display"),
            params,
            compute: Box::new(compute),
            render: RefCell::new(Box::new(render)),
            cache: Some(RefCell::new(cache)),
        })
    }

    /// The declared parameter names, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl<T> Subscribe for Display<T> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn on_snapshot(&self, snapshot: &Snapshot) -> Result<(), Error> {
        if let Some(cache) = &self.cache {
            if !cache.borrow_mut().should_run(snapshot) {
                tracing::trace!(
                    identifier = self.identifier.as_str(),
                    "no tracked parameter changed, skipping recomputation"
                );
                return Ok(());
            }
        }

        let args = Args::project(&self.params, snapshot)?;
        let data = perf::timed(&self.identifier, "callback-compute", || {
            (self.compute)(&args)
        })
        .map_err(|source| Error::Callback {
            identifier: self.identifier.clone(),
            source,
        })?;

        let mut render = self.render.borrow_mut();
        perf::timed(&self.identifier, "render", || (*render)(data));
        Ok(())
    }
}

impl<T> std::fmt::Debug for Display<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("identifier", &self.identifier)
            .field("params", &self.params)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

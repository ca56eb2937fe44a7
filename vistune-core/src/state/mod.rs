//! Shared State
//!
//! This module implements the channel between controls and displays: the
//! [`ControlSignal`] change event and the [`StateHub`] keyed store that
//! merges signals and broadcasts full snapshots to its subscribers.
//!
//! # Propagation model
//!
//! A control interaction produces one `ControlSignal`. The hub merges it
//! into storage and immediately re-broadcasts the *entire* snapshot to every
//! subscriber, synchronously and in subscription order. There is no
//! batching: N signals mean N broadcasts, even when values are unchanged.
//! Skipping redundant recomputation is the job of each display's own dirty
//! check, not the hub's.

mod hub;
mod signal;

pub use hub::{Snapshot, StateHub, Subscribe};
pub use signal::ControlSignal;

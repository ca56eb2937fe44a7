//! Displays
//!
//! Displays are the consumers of the system. Each one declares the
//! parameter names its callback needs, and on every hub broadcast decides,
//! through an optional [`CallbackCache`], whether the update warrants a
//! recomputation. When it does, the snapshot is projected onto the declared
//! parameters, the compute callback runs, and the result is handed to the
//! render sink, all synchronously.

mod args;
mod cache;
mod panel;

pub use args::Args;
pub use cache::{CacheSpec, CallbackCache, Exclude};
pub use panel::Display;

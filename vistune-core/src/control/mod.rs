//! Controls
//!
//! Controls are the producers of the system: each one owns a parameter key
//! and emits a [`ControlSignal`](crate::state::ControlSignal) whenever its
//! value changes. Controls are constructed detached, affecting no display
//! until context wiring binds them to a hub, and stay bound to that one hub
//! for their lifetime.
//!
//! The concrete controls here are state machines only; rendering an actual
//! slider or checkbox on screen belongs to an outer widget layer.

mod animator;
mod core;
mod toggle;
mod trackbar;

pub use animator::{Animator, ANIMATION_TICK_KEY};
pub use self::core::{Control, ControlCore};
pub use toggle::{Toggle, ToggleConfig};
pub use trackbar::{Trackbar, TrackbarConfig};

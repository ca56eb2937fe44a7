//! Animator Control
//!
//! A timer-driven control that emits a monotonically increasing tick
//! counter under the reserved `animation_tick` key. Displays opt in to
//! timed updates by declaring that parameter; displays that do not track it
//! are never recomputed by animation, even while the timer runs.
//!
//! # Timer model
//!
//! The periodic timer is a task spawned on the host's current-thread
//! runtime via `spawn_local`, so every tick executes the full synchronous
//! chain (increment -> emit -> broadcast -> dirty-check -> compute -> render)
//! before the event loop proceeds. The requested rate is therefore an upper
//! bound: a slow display callback delays the next tick along with
//! everything else.
//!
//! Starting the timer (`new` with auto-start, or `pause_play` from the
//! stopped state) must happen inside a [`tokio::task::LocalSet`].
//!
//! # Counter arithmetic
//!
//! The tick counter wraps on both overflow and underflow: `reverse()` at
//! zero yields `u64::MAX`. Callbacks that index frame sequences should
//! reduce the counter modulo their sequence length.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::core::{Control, ControlCore};
use crate::error::Error;
use crate::identifier::IdGenerator;
use crate::state::{ControlSignal, StateHub};
use crate::value::Value;

/// Reserved parameter key the animator publishes its counter under.
pub const ANIMATION_TICK_KEY: &str = "animation_tick";

struct AnimatorInner {
    core: ControlCore,
    tick: Cell<u64>,
    interval: Duration,
}

impl AnimatorInner {
    fn emit_tick(&self) -> Result<(), Error> {
        self.core.emit(Value::UInt(self.tick.get()))
    }

    fn on_tick(&self) -> Result<(), Error> {
        self.tick.set(self.tick.get().wrapping_add(1));
        self.emit_tick()
    }
}

/// A timer-driven tick source that behaves exactly like any other control.
pub struct Animator {
    inner: Rc<AnimatorInner>,
    timer: RefCell<Option<JoinHandle<()>>>,
}

impl Animator {
    /// Create an animator targeting `ups` updates per second.
    ///
    /// The timer interval is `round(1000 / ups)` milliseconds. With
    /// `auto_start` the timer begins immediately, which requires running
    /// inside the host `LocalSet`; otherwise the animator waits in the
    /// stopped state for `pause_play`.
    pub fn new(ids: &IdGenerator, ups: f64, auto_start: bool) -> Result<Self, Error> {
        if !(ups > 0.0) {
            return Err(Error::InvalidUpdateRate(ups));
        }

        let interval = Duration::from_millis((1e3 / ups).round() as u64);
        let inner = Rc::new(AnimatorInner {
            core: ControlCore::new(ids, "animator", ANIMATION_TICK_KEY)?,
            tick: Cell::new(0),
            interval,
        });

        let animator = Self {
            inner,
            timer: RefCell::new(None),
        };
        if auto_start {
            animator.pause_play();
        }
        Ok(animator)
    }

    /// The current tick counter value.
    pub fn tick(&self) -> u64 {
        self.inner.tick.get()
    }

    /// The configured timer period.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Whether the periodic timer is running.
    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }

    /// Toggle between the running and stopped states.
    ///
    /// Stopped -> running starts the periodic timer; running -> stopped
    /// cancels it. There are no intermediate states.
    pub fn pause_play(&self) {
        let mut timer = self.timer.borrow_mut();
        match timer.take() {
            Some(handle) => {
                handle.abort();
                tracing::debug!(
                    identifier = self.inner.core.identifier(),
                    "animation stopped"
                );
            }
            None => {
                *timer = Some(self.spawn_timer());
                tracing::debug!(
                    identifier = self.inner.core.identifier(),
                    interval_ms = self.inner.interval.as_millis() as u64,
                    "animation started"
                );
            }
        }
    }

    /// Advance the counter by one and emit, regardless of running state.
    pub fn forward(&self) -> Result<(), Error> {
        self.inner.on_tick()
    }

    /// Rewind the counter by one and emit, regardless of running state.
    ///
    /// Wraps to `u64::MAX` when the counter is at zero.
    pub fn reverse(&self) -> Result<(), Error> {
        self.inner.tick.set(self.inner.tick.get().wrapping_sub(1));
        self.inner.emit_tick()
    }

    /// Reset the counter to zero and emit.
    pub fn reset(&self) -> Result<(), Error> {
        self.inner.tick.set(0);
        self.inner.emit_tick()
    }

    fn spawn_timer(&self) -> JoinHandle<()> {
        let inner = Rc::clone(&self.inner);
        let period = self.inner.interval;
        tokio::task::spawn_local(async move {
            // First fire after one full period, matching a freshly started
            // interval timer.
            let mut ticks = time::interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if let Err(error) = inner.on_tick() {
                    // A tick cannot propagate an error to any caller; report
                    // it and keep the timer alive.
                    tracing::error!(
                        identifier = inner.core.identifier(),
                        %error,
                        "animation tick dropped"
                    );
                }
            }
        })
    }
}

impl Control for Animator {
    fn key(&self) -> &str {
        self.inner.core.key()
    }

    fn identifier(&self) -> &str {
        self.inner.core.identifier()
    }

    fn current_signal(&self) -> ControlSignal {
        self.inner.core.signal(Value::UInt(self.inner.tick.get()))
    }

    fn bind(&self, hub: &Rc<StateHub>) -> Result<(), Error> {
        self.inner.core.bind(hub)
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.borrow_mut().take() {
            handle.abort();
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

//! Performance Instrumentation
//!
//! An opt-in timing layer around display compute and render calls. When the
//! `VISTUNE_PERF` environment variable is set to `1`, each wrapped call
//! emits one `tracing` event on the `vistune_perf` target carrying the
//! widget identifier, an event tag, the elapsed time in seconds, and the
//! updates-per-second that cost implies.
//!
//! The layer is strictly pass-through: it never changes what runs, in what
//! order, or what is returned. Note the reported rate is per call site. A
//! compute rate of 20k/s does not promise 20k rendered frames per second,
//! since rendering has its own cost.

use std::sync::OnceLock;
use std::time::Instant;

/// Guards division when a call returns faster than the clock resolution.
const EPSILON: f64 = 1e-9;

static ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether timing lines are being emitted for this process.
///
/// The environment is consulted once; changing the variable afterwards has
/// no effect.
pub fn enabled() -> bool {
    *ENABLED.get_or_init(|| {
        std::env::var("VISTUNE_PERF")
            .map(|v| v == "1")
            .unwrap_or(false)
    })
}

/// Run `f`, logging its wall-clock cost when instrumentation is enabled.
///
/// `identifier` names the widget the call belongs to and `event` names the
/// call category (`callback-compute`, `render`, ...).
pub fn timed<T>(identifier: &str, event: &str, f: impl FnOnce() -> T) -> T {
    if !enabled() {
        return f();
    }

    let start = Instant::now();
    let result = f();
    let seconds = start.elapsed().as_secs_f64();

    tracing::info!(
        target: "vistune_perf",
        identifier,
        event,
        seconds,
        updates_per_second = 1.0 / (seconds + EPSILON),
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_passes_the_result_through() {
        let out = timed("display-00000000", "callback-compute", || 41 + 1);
        assert_eq!(out, 42);
    }

    #[test]
    fn timed_runs_the_closure_exactly_once() {
        let mut calls = 0;
        timed("display-00000000", "render", || calls += 1);
        assert_eq!(calls, 1);
    }
}

//! Vistune Core
//!
//! This crate provides the reactive core of the Vistune parameter-tuning
//! toolkit. It implements:
//!
//! - The control -> hub -> display signal-propagation protocol
//! - Per-display dirty-check caching for selective recomputation
//! - A timer-driven animator that behaves like any other control
//! - The context-wiring procedure binding controls and displays to one hub
//!
//! Concrete rendering (images, plots, 3D surfaces), widget layout, and the
//! windowing runtime live in outer layers; this crate only decides *when*
//! a display recomputes and re-renders.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `state`: the keyed store and broadcast channel ([`state::StateHub`])
//! - `control`: signal producers (trackbars, toggles, the animator)
//! - `display`: signal consumers with optional dirty-check caching
//! - `context`: the one-shot wiring procedure
//! - `value`, `error`, `identifier`, `perf`: shared plumbing
//!
//! # Concurrency model
//!
//! Everything is single-threaded and cooperative: one control interaction
//! runs the full chain (emit, store, broadcast, dirty-check, compute,
//! render) synchronously before the host event loop continues. The only
//! asynchronous trigger is the animator's timer, a local task on the host's
//! current-thread runtime, and its ticks run that same chain to completion.
//! A slow display callback blocks the entire loop, including subsequent
//! ticks; budget callbacks accordingly.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use vistune_core::context::configure_hub;
//! use vistune_core::control::{Control, Trackbar, TrackbarConfig};
//! use vistune_core::display::{CacheSpec, Display};
//! use vistune_core::identifier::IdGenerator;
//! use vistune_core::state::Subscribe;
//!
//! let ids = IdGenerator::new();
//! let rho = Rc::new(Trackbar::new(&ids, "rho", TrackbarConfig::with_unit_step(0.0, 100.0)?)?);
//! let sigma = Rc::new(Trackbar::new(&ids, "sigma", TrackbarConfig::with_unit_step(0.0, 100.0)?)?);
//!
//! // Recomputes only when sigma changes; rho updates are skipped.
//! let view = Rc::new(Display::with_cache(
//!     &ids,
//!     ["rho", "sigma"],
//!     CacheSpec::include(["sigma"]),
//!     |args| Ok(args.f64("rho")? + args.f64("sigma")?),
//!     |sum| println!("{sum}"),
//! )?);
//!
//! let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), sigma.clone()];
//! let displays: Vec<Rc<dyn Subscribe>> = vec![view.clone()];
//! let hub = configure_hub(&controls, &displays, None)?;
//!
//! sigma.set_value(10.0)?;  // broadcasts, recomputes, re-renders
//! ```

pub mod context;
pub mod control;
pub mod display;
pub mod error;
pub mod identifier;
pub mod perf;
pub mod state;
pub mod value;

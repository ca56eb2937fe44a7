//! Integration Tests for the Propagation Core
//!
//! These tests verify that controls, the hub, the dirty-check engine, and
//! the animator work together correctly, end to end.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use vistune_core::context::configure_hub;
use vistune_core::control::{Animator, Control, Trackbar, TrackbarConfig, ANIMATION_TICK_KEY};
use vistune_core::display::{Args, CacheSpec, Display};
use vistune_core::error::{BoxError, Error};
use vistune_core::identifier::IdGenerator;
use vistune_core::state::{ControlSignal, Snapshot, StateHub, Subscribe};
use vistune_core::value::Value;

fn trackbar(ids: &IdGenerator, key: &str, init: f64) -> Rc<Trackbar> {
    let config = TrackbarConfig::new(0.0, 100.0, 1.0, init).unwrap();
    Rc::new(Trackbar::new(ids, key, config).unwrap())
}

/// A display summing rho and sigma, reporting its render count and last
/// rendered value.
fn sum_display(
    ids: &IdGenerator,
    cache: Option<CacheSpec>,
) -> (Rc<Display<f64>>, Rc<Cell<u32>>, Rc<Cell<f64>>) {
    let renders = Rc::new(Cell::new(0u32));
    let last = Rc::new(Cell::new(f64::NAN));
    let renders_sink = renders.clone();
    let last_sink = last.clone();

    let compute = |args: &Args<'_>| -> Result<f64, BoxError> {
        Ok(args.f64("rho")? + args.f64("sigma")?)
    };
    let render = move |sum: f64| {
        renders_sink.set(renders_sink.get() + 1);
        last_sink.set(sum);
    };

    let display = match cache {
        Some(spec) => {
            Rc::new(Display::with_cache(ids, ["rho", "sigma"], spec, compute, render).unwrap())
        }
        None => Rc::new(Display::new(ids, ["rho", "sigma"], compute, render)),
    };
    (display, renders, last)
}

#[test]
fn uncached_display_recomputes_on_every_broadcast() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let sigma = trackbar(&ids, "sigma", 0.0);
    let (display, renders, _) = sum_display(&ids, None);

    let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), sigma.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    configure_hub(&controls, &displays, None).unwrap();

    // One render from the wiring flush.
    assert_eq!(renders.get(), 1);

    // N modifications produce N more renders, unchanged values included.
    rho.set_value(75.0).unwrap();
    rho.set_value(75.0).unwrap();
    sigma.set_value(10.0).unwrap();
    assert_eq!(renders.get(), 4);
}

#[test]
fn exclude_all_display_renders_exactly_once() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let sigma = trackbar(&ids, "sigma", 0.0);
    let (display, renders, _) = sum_display(&ids, Some(CacheSpec::exclude_all()));

    let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), sigma.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    configure_hub(&controls, &displays, None).unwrap();

    assert_eq!(renders.get(), 1);

    for value in [10.0, 20.0, 30.0] {
        rho.set_value(value).unwrap();
        sigma.set_value(value).unwrap();
    }

    // Frozen after the first frame, no matter how much state churns.
    assert_eq!(renders.get(), 1);
}

#[test]
fn include_cache_ignores_untracked_parameters() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let sigma = trackbar(&ids, "sigma", 0.0);
    let (display, renders, _) = sum_display(&ids, Some(CacheSpec::include(["sigma"])));

    let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), sigma.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    configure_hub(&controls, &displays, None).unwrap();
    assert_eq!(renders.get(), 1);

    // Rho is not tracked: broadcasts happen, renders do not.
    rho.set_value(75.0).unwrap();
    rho.set_value(80.0).unwrap();
    assert_eq!(renders.get(), 1);

    // Sigma is tracked: exactly one more render.
    sigma.set_value(10.0).unwrap();
    assert_eq!(renders.get(), 2);
}

#[test]
fn flush_is_never_deduplicated() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let sigma = trackbar(&ids, "sigma", 0.0);
    let (display, renders, _) = sum_display(&ids, None);

    let controls: Vec<Rc<dyn Control>> = vec![rho, sigma];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    let hub = configure_hub(&controls, &displays, None).unwrap();
    assert_eq!(renders.get(), 1);

    // Two flushes with no intervening modification: two more identical
    // snapshots, two more render cycles.
    hub.flush().unwrap();
    hub.flush().unwrap();
    assert_eq!(renders.get(), 3);
}

#[test]
fn duplicate_control_keys_never_emit_a_signal() {
    let ids = IdGenerator::new();
    let a = trackbar(&ids, "rho", 1.0);
    let b = trackbar(&ids, "rho", 2.0);
    let (display, renders, _) = sum_display(&ids, None);

    let controls: Vec<Rc<dyn Control>> = vec![a, b];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    let result = configure_hub(&controls, &displays, None);

    assert!(matches!(result, Err(Error::DuplicateKey(key)) if key == "rho"));
    assert_eq!(renders.get(), 0);
}

#[test]
fn end_to_end_sum_of_two_trackbars() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let sigma = trackbar(&ids, "sigma", 0.0);
    let (display, _, last) = sum_display(&ids, None);

    let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), sigma.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![display];
    let hub = configure_hub(&controls, &displays, None).unwrap();

    // The wiring flush rendered the seeded state.
    assert_eq!(last.get(), 50.0);

    rho.set_value(75.0).unwrap();
    assert_eq!(last.get(), 75.0);
    assert_eq!(hub.snapshot().get("rho"), Some(&Value::Float(75.0)));
    assert_eq!(hub.snapshot().get("sigma"), Some(&Value::Float(0.0)));

    sigma.set_value(10.0).unwrap();
    assert_eq!(last.get(), 85.0);
}

#[test]
fn forward_then_reverse_restores_the_tick() {
    struct KeyProbe {
        keys_seen: Cell<u32>,
        last_tick: Cell<u64>,
    }

    impl Subscribe for KeyProbe {
        fn identifier(&self) -> &str {
            "key-probe"
        }

        fn on_snapshot(&self, snapshot: &Snapshot) -> Result<(), Error> {
            if let Some(value) = snapshot.get(ANIMATION_TICK_KEY) {
                self.keys_seen.set(self.keys_seen.get() + 1);
                self.last_tick.set(value.as_u64().unwrap());
            }
            Ok(())
        }
    }

    let ids = IdGenerator::new();
    let animator = Rc::new(Animator::new(&ids, 30.0, false).unwrap());
    let probe = Rc::new(KeyProbe {
        keys_seen: Cell::new(0),
        last_tick: Cell::new(0),
    });

    let controls: Vec<Rc<dyn Control>> = vec![animator.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![probe.clone()];
    configure_hub(&controls, &displays, None).unwrap();

    let before = animator.tick();
    animator.forward().unwrap();
    animator.reverse().unwrap();

    assert_eq!(animator.tick(), before);
    // Flush + two manual steps, every one carrying the reserved key.
    assert_eq!(probe.keys_seen.get(), 3);
    assert_eq!(probe.last_tick.get(), before);
}

#[test]
fn animation_ticks_skip_displays_that_do_not_track_them() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let animator = Rc::new(Animator::new(&ids, 30.0, false).unwrap());

    let frames = Rc::new(Cell::new(0u32));
    let frames_sink = frames.clone();
    let animated: Rc<Display<u64>> = Rc::new(
        Display::with_cache(
            &ids,
            ["rho", ANIMATION_TICK_KEY],
            CacheSpec::include([ANIMATION_TICK_KEY]),
            |args| Ok(args.u64(ANIMATION_TICK_KEY)?),
            move |_| frames_sink.set(frames_sink.get() + 1),
        )
        .unwrap(),
    );

    let stills = Rc::new(Cell::new(0u32));
    let stills_sink = stills.clone();
    let still: Rc<Display<f64>> = Rc::new(
        Display::with_cache(
            &ids,
            ["rho"],
            CacheSpec::track_all(),
            |args| Ok(args.f64("rho")?),
            move |_| stills_sink.set(stills_sink.get() + 1),
        )
        .unwrap(),
    );

    let controls: Vec<Rc<dyn Control>> = vec![rho.clone(), animator.clone()];
    let displays: Vec<Rc<dyn Subscribe>> = vec![animated, still];
    configure_hub(&controls, &displays, None).unwrap();
    assert_eq!((frames.get(), stills.get()), (1, 1));

    // Ticks drive the animated display only.
    animator.forward().unwrap();
    animator.forward().unwrap();
    assert_eq!((frames.get(), stills.get()), (3, 1));

    // And rho drives the still display only.
    rho.set_value(75.0).unwrap();
    assert_eq!((frames.get(), stills.get()), (3, 2));
}

#[test]
fn failing_display_leaves_the_write_committed() {
    let ids = IdGenerator::new();
    let rho = trackbar(&ids, "rho", 50.0);
    let failing: Rc<Display<f64>> = Rc::new(Display::new(
        &ids,
        ["rho"],
        |_| Err("compute exploded".into()),
        |_| {},
    ));

    let hub = Rc::new(StateHub::new());
    rho.bind(&hub).unwrap();
    hub.register(rho.current_signal()).unwrap();
    hub.subscribe(failing);

    let result = rho.set_value(75.0);
    assert!(matches!(result, Err(Error::Callback { .. })));

    // The storage mutation preceded the broadcast and stands.
    assert_eq!(hub.snapshot().get("rho"), Some(&Value::Float(75.0)));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn timer_driven_updates_reach_tracking_displays() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let ids = IdGenerator::new();
            let animator = Rc::new(Animator::new(&ids, 10.0, false).unwrap());

            let frames = Rc::new(Cell::new(0u32));
            let frames_sink = frames.clone();
            let display: Rc<Display<u64>> = Rc::new(
                Display::with_cache(
                    &ids,
                    [ANIMATION_TICK_KEY],
                    CacheSpec::include([ANIMATION_TICK_KEY]),
                    |args| Ok(args.u64(ANIMATION_TICK_KEY)?),
                    move |_| frames_sink.set(frames_sink.get() + 1),
                )
                .unwrap(),
            );

            let controls: Vec<Rc<dyn Control>> = vec![animator.clone()];
            let displays: Vec<Rc<dyn Subscribe>> = vec![display];
            configure_hub(&controls, &displays, None).unwrap();
            assert_eq!(frames.get(), 1);

            animator.pause_play();
            tokio::time::sleep(Duration::from_millis(450)).await;

            // Four 100ms ticks elapsed, each one a full broadcast + render.
            assert_eq!(animator.tick(), 4);
            assert_eq!(frames.get(), 5);

            animator.pause_play();
            tokio::time::sleep(Duration::from_millis(300)).await;
            assert_eq!(frames.get(), 5);
        })
        .await;
}

#[test]
fn hub_can_be_driven_without_wiring() {
    // The hub contract stands on its own: register, modify, flush.
    let hub = StateHub::new();
    hub.register(ControlSignal::new("rho", 1.0).unwrap()).unwrap();

    let result = hub.register(ControlSignal::new("rho", 2.0).unwrap());
    assert!(matches!(result, Err(Error::DuplicateKey(_))));

    hub.modify(ControlSignal::new("rho", 3.0).unwrap()).unwrap();
    assert_eq!(hub.snapshot().get("rho"), Some(&Value::Float(3.0)));
}

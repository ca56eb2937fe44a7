//! Benchmarks for the propagation hot paths: hub modification (runs once
//! per control interaction) and the cache dirty check (runs once per
//! display per broadcast).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vistune_core::display::{CacheSpec, CallbackCache};
use vistune_core::state::{ControlSignal, Snapshot, StateHub};
use vistune_core::value::Value;

fn bench_hub_modify(c: &mut Criterion) {
    let hub = StateHub::new();
    hub.register(ControlSignal::new("rho", 0.0).unwrap())
        .unwrap();

    c.bench_function("hub_modify_no_subscribers", |b| {
        b.iter(|| {
            hub.modify(ControlSignal::new("rho", black_box(1.0)).unwrap())
                .unwrap()
        })
    });
}

fn bench_cache_should_run(c: &mut Criterion) {
    let declared = vec!["rho".to_owned(), "sigma".to_owned()];
    let mut snapshot = Snapshot::new();
    snapshot.insert("rho".to_owned(), Value::Float(1.0));
    snapshot.insert("sigma".to_owned(), Value::Float(2.0));

    let mut cache = CallbackCache::new(CacheSpec::track_all(), &declared).unwrap();
    cache.should_run(&snapshot);

    // Steady state: nothing changed, the check must answer quickly.
    c.bench_function("cache_should_run_clean", |b| {
        b.iter(|| cache.should_run(black_box(&snapshot)))
    });
}

criterion_group!(benches, bench_hub_modify, bench_cache_should_run);
criterion_main!(benches);

//! Benchmarks to measure the compute overhead of `took` logic itself.
//!
//! These benchmarks measure empty measurements - measurements that do not wrap any actual
//! work but still read the clock twice, record a duration, render the message and notify.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group, criterion_main};
use took::{TracingNotifier, Tracker};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("took_overhead");

    // Baseline measurement - no tracking at all
    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    // A fresh tracker per sample keeps the recorded durations from growing without bound.
    group.bench_function("guard_discarding_notifier", |b| {
        b.iter_custom(|iters| {
            let tracker = Tracker::builder().notifier(|_: &str| {}).build();
            timed(iters, || {
                let _measurement = tracker.begin();
                black_box(());
            })
        });
    });

    group.bench_function("wrapped_discarding_notifier", |b| {
        b.iter_custom(|iters| {
            let tracker = Tracker::builder().notifier(|_: &str| {}).build();
            let identity = tracker.wrap(|x: u64| x);
            timed(iters, || {
                black_box(identity(black_box(42)));
            })
        });
    });

    // No subscriber is installed, so the tracing events go nowhere.
    group.bench_function("guard_tracing_notifier", |b| {
        b.iter_custom(|iters| {
            let tracker = Tracker::builder()
                .notifier(TracingNotifier::named("bench"))
                .build();
            timed(iters, || {
                let _measurement = tracker.begin();
                black_box(());
            })
        });
    });

    group.finish();
}

fn timed(iters: u64, mut f: impl FnMut()) -> Duration {
    let start = Instant::now();
    for _ in 0..iters {
        f();
    }
    start.elapsed()
}

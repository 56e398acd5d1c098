//! Simplified example demonstrating the key `took` types working together.
//!
//! This example shows:
//! - `Tracker`: Measures blocks of work and records their durations
//! - `Measurement`: Scope guard returned by `Tracker::begin()`
//! - `Tracker::wrap()`: Measures every call of a function
//!
//! Run with: `cargo run --example took_basic`.

use std::hint::black_box;

use took::Tracker;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let tracker = Tracker::new();

    // Scoped measurement of a block.
    {
        let _measurement = tracker.begin();
        black_box((0..1_000_000_u64).sum::<u64>());
    }

    // The same via a closure, keeping the result.
    let sum = tracker.measure(|| (0..1_000_000_u64).map(black_box).sum::<u64>());
    println!("Sum: {sum}");

    // Every call of the wrapped function is measured.
    let fibonacci = tracker.wrap(|n: u32| {
        let (mut a, mut b) = (0_u64, 1_u64);
        for _ in 0..n {
            (a, b) = (b, a.wrapping_add(b));
        }
        a
    });
    println!("fib(50) = {}", fibonacci(50));
    println!("fib(90) = {}", fibonacci(90));

    println!();
    println!("Recorded durations: {:?}", tracker.durations());
    println!("Summary: {tracker}");
}

//! Example using several trackers to time different kinds of operations.
//!
//! Both trackers notify through the same named `tracing` notifier so their output can be
//! filtered as one stream, while each keeps its own durations for a final summary.
//!
//! Run with: `cargo run --example took_multiple_trackers`.

use std::collections::BTreeMap;
use std::sync::Arc;

use took::{Notifier, TracingNotifier, Tracker};

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let timings: Arc<dyn Notifier> = Arc::new(TracingNotifier::named("times"));

    let trackers: BTreeMap<&str, Tracker> = BTreeMap::from([
        (
            "printing",
            Tracker::builder()
                .template("Printing took {}s")
                .shared_notifier(Arc::clone(&timings))
                .build(),
        ),
        (
            "logical operations",
            Tracker::builder()
                .template("Logical operation took {}s")
                .shared_notifier(timings)
                .build(),
        ),
    ]);

    trackers["printing"].measure(|| println!("Starting"));

    let show_formatted = trackers["printing"].wrap(|condition: bool| {
        println!("The condition was {condition}");
    });

    for x in 0..3 {
        let condition = trackers["logical operations"].measure(|| x % 3 == 0);
        show_formatted(condition);
    }

    println!();
    for (name, tracker) in &trackers {
        println!(
            "Time spent on {name}: {}s over {} measurements",
            tracker.total(),
            tracker.len()
        );
    }
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wall-clock measurement of code blocks and function calls.
//!
//! This package provides a single reusable measurement primitive, the [`Tracker`]. A tracker
//! measures the elapsed wall-clock time around a block of work, appends the duration (in seconds)
//! to an in-memory list and pushes a formatted message to a [`Notifier`] each time a measurement
//! completes. By default the message is `"Execution took {}s"` and the notifier is a
//! [`TracingNotifier`], which emits the message as an `INFO` event via the `tracing` crate.
//!
//! The core functionality includes:
//! - [`Tracker`] - Owns the recorded durations and creates measurements
//! - [`Measurement`] - Scope guard that measures from creation until it is ended or dropped
//! - [`MessageTemplate`] - The message with one substitution slot for the duration
//! - [`Notifier`] - Sink that receives one message per completed measurement
//!
//! # Measuring a block
//!
//! ```
//! use took::Tracker;
//!
//! let tracker = Tracker::with_template("Summing took {}s");
//!
//! {
//!     let _measurement = tracker.begin();
//!     let sum: u64 = (0..1000).sum();
//!     assert_eq!(sum, 499_500);
//! } // Measurement ends here and the duration is recorded.
//!
//! // Or, equivalently, via a closure.
//! let sum = tracker.measure(|| (0..1000_u64).sum::<u64>());
//! assert_eq!(sum, 499_500);
//!
//! assert_eq!(tracker.len(), 2);
//! ```
//!
//! # Measuring every call of a function
//!
//! ```
//! use took::Tracker;
//!
//! let tracker = Tracker::with_template("Doubling took {:.6}s");
//! let double = tracker.wrap(|x: i32| x * 2);
//!
//! assert_eq!(double(21), 42);
//! assert_eq!(double(50), 100);
//!
//! assert_eq!(tracker.len(), 2);
//! println!("Spent {}s doubling in total", tracker.total());
//! ```
//!
//! # Overlapping measurements
//!
//! Each [`Measurement`] carries its own start time, so nested measurements and measurements
//! running concurrently on different threads do not interfere with each other, even when they
//! are created from the same tracker. Durations are recorded in the order the measurements end.
//!
//! # Failures
//!
//! Measurements are recorded and notified on every exit path, including when the measured work
//! returns an error or panics. Errors and panics of the measured work are passed to the caller
//! unchanged.

mod error;
mod measurement;
mod notifier;
mod pal;
mod template;
mod tracker;

pub use error::Error;
pub(crate) use error::Result;
pub use measurement::Measurement;
pub use notifier::{Notifier, TracingNotifier};
pub use template::{DEFAULT_TEMPLATE, MessageTemplate};
pub use tracker::{Tracker, TrackerBuilder};

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - a panic occurred while recording a duration";

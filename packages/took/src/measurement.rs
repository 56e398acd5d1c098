//! Scope guard for a single measurement.

use std::thread;
use std::time::Instant;

use crate::pal::Platform;
use crate::{Result, Tracker};

/// A measurement in progress, started by [`Tracker::begin()`].
///
/// The measurement ends when it is dropped or when [`end()`][Self::end] is called, whichever
/// happens first. Ending it records the elapsed wall-clock time in the tracker and emits the
/// rendered message to the tracker's notifier. Dropping covers every exit path from the scope,
/// including early returns, `?` and panics.
///
/// Each measurement carries its own start time, so any number of measurements can be open on
/// the same tracker at once, nested or on different threads.
///
/// # Examples
///
/// ```
/// use took::Tracker;
///
/// fn load(tracker: &Tracker, path: &str) -> Result<String, std::io::Error> {
///     let _measurement = tracker.begin();
///     // The duration is recorded even if the read fails.
///     std::fs::read_to_string(path)
/// }
///
/// let tracker = Tracker::new();
/// assert!(load(&tracker, "/this/file/does/not/exist").is_err());
/// assert_eq!(tracker.len(), 1);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct Measurement<'a> {
    tracker: &'a Tracker,
    start: Instant,
    ended: bool,
}

impl<'a> Measurement<'a> {
    pub(crate) fn new(tracker: &'a Tracker) -> Self {
        tracker.measurement_opened();
        let start = tracker.platform().now();

        Self {
            tracker,
            start,
            ended: false,
        }
    }

    /// The wall-clock time elapsed since the measurement started, in seconds.
    ///
    /// This does not end the measurement.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.tracker
            .platform()
            .now()
            .saturating_duration_since(self.start)
            .as_secs_f64()
    }

    /// Ends the measurement, returning the recorded duration in seconds.
    ///
    /// The duration is recorded before the message is rendered, so it is recorded
    /// even if rendering fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker's message template cannot be rendered. No message is
    /// emitted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::Tracker;
    ///
    /// let tracker = Tracker::with_template("no slot");
    ///
    /// let measurement = tracker.begin();
    /// assert!(measurement.end().is_err());
    ///
    /// // The duration was still recorded.
    /// assert_eq!(tracker.len(), 1);
    /// ```
    pub fn end(mut self) -> Result<f64> {
        self.finish()
    }

    fn finish(&mut self) -> Result<f64> {
        self.ended = true;

        let seconds = self
            .tracker
            .platform()
            .now()
            .saturating_duration_since(self.start)
            .as_secs_f64();

        self.tracker.complete(seconds).map(|()| seconds)
    }
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        if self.ended {
            return;
        }

        if let Err(error) = self.finish() {
            if thread::panicking() {
                // The measured work is already unwinding, its panic takes precedence.
                tracing::error!(%error, "measurement message could not be rendered");
            } else {
                panic!("{error}");
            }
        }
    }
}

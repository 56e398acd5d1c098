//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Instant;

/// Provides the current time to measurements.
///
/// This trait abstracts the clock so that tests can drive measurements
/// with predetermined timestamps instead of the real clock.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current time.
    ///
    /// Consecutive calls are expected to return non-decreasing values.
    fn now(&self) -> Instant;
}

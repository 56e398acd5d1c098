use std::time::Instant;

use crate::pal::Platform;

/// Reads the monotonic clock of the operating system via the Rust standard library.
#[derive(Debug)]
pub(crate) struct RealPlatform;

pub(crate) static REAL_PLATFORM: RealPlatform = RealPlatform;

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Cannot observe the real clock deterministically.
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
#[cfg(not(miri))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn time_does_not_go_backwards() {
        let first = REAL_PLATFORM.now();
        let second = REAL_PLATFORM.now();

        assert!(second >= first);
    }
}

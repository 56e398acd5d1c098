use std::fmt::Debug;
#[cfg(test)]
use std::sync::Arc;
use std::time::Instant;

#[cfg(test)]
use crate::pal::MockPlatform;
use crate::pal::{Platform, REAL_PLATFORM, RealPlatform};

#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Real(&'static RealPlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(&REAL_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Platform for PlatformFacade {
    fn now(&self) -> Instant {
        match self {
            Self::Real(p) => p.now(),
            #[cfg(test)]
            Self::Mock(p) => p.now(),
        }
    }
}

impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(p) => p.fmt(f),
            #[cfg(test)]
            Self::Mock(p) => p.fmt(f),
        }
    }
}

/// Creates a platform whose clock returns the given offsets from an arbitrary base instant,
/// one per call, in order. Reading the clock more often than there are offsets panics.
#[cfg(test)]
pub(crate) fn fake_clock(offsets: impl IntoIterator<Item = std::time::Duration>) -> PlatformFacade {
    let base = Instant::now();
    let mut remaining: std::collections::VecDeque<_> = offsets.into_iter().collect();

    let mut mock = MockPlatform::new();
    mock.expect_now().returning(move || {
        base + remaining
            .pop_front()
            .expect("fake clock was read more times than the test prepared for")
    });

    PlatformFacade::from_mock(mock)
}

/// Like [`fake_clock()`] but with offsets in whole seconds.
#[cfg(test)]
pub(crate) fn fake_clock_secs(offsets: &[u64]) -> PlatformFacade {
    fake_clock(offsets.iter().copied().map(std::time::Duration::from_secs))
}

//! Mockable time source.
//!
//! # States
//! - Fixed: every call yields the same mocked timestamp
//! - Relative: the mocked timestamp advances with real time, offset from
//!   a reference instant
//!
//! # Design Decisions
//! - Exactly two variants, each carrying only the fields its mode needs
//! - A mock resolves to a plain timestamp-producing function; consumers
//!   cannot tell it apart from the real source

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

/// A timestamp source yielding unix epoch milliseconds.
pub type TimeFn = Arc<dyn Fn() -> u64 + Send + Sync>;

/// The real time source.
pub fn system_time() -> TimeFn {
    Arc::new(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    })
}

/// A mocked clock, fixed or relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMock {
    /// Always yield `mocked_ms`.
    Fixed {
        /// The frozen timestamp, epoch milliseconds.
        mocked_ms: u64,
    },
    /// Yield `mocked_ms` plus however much real time passed since
    /// `reference_ms`.
    Relative {
        /// The mocked origin, epoch milliseconds.
        mocked_ms: u64,
        /// The real instant the mock was anchored at, epoch milliseconds.
        reference_ms: u64,
    },
}

impl ClockMock {
    /// Resolve the mock into a timestamp source.
    ///
    /// `real` is only consulted by the relative variant.
    pub fn into_time_fn(self, real: TimeFn) -> TimeFn {
        warn!("time mock is enabled");

        Arc::new(move || {
            let now = match self {
                ClockMock::Fixed { mocked_ms } => mocked_ms,
                ClockMock::Relative {
                    mocked_ms,
                    reference_ms,
                } => mocked_ms + real().saturating_sub(reference_ms),
            };

            debug!(now, "picked a mocked timestamp");
            now
        })
    }
}

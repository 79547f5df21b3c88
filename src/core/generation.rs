//! Tickets for discarding results of superseded operations

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter that lets a newer operation invalidate an older, still pending one.
///
/// Each call to [`Generation::begin`] hands out a ticket; only the holder of the
/// latest ticket is allowed to publish its result.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

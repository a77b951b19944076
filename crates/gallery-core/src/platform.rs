//! Time sources.
//!
//! Everything that measures elapsed time (scroll physics, tap and long-press
//! timeouts) reads it through [`Clock`], so tests and hosts can substitute a
//! virtual clock for the wall clock.

use web_time::Instant;

use crate::NANOS_PER_MILLI;

/// Provides a monotonic timestamp.
pub trait Clock {
    /// Nanoseconds since an arbitrary, fixed origin.
    fn now_nanos(&self) -> u64;

    fn now_millis(&self) -> u64 {
        self.now_nanos() / NANOS_PER_MILLI
    }
}

/// Wall clock backed by `web_time::Instant`, so it also works on wasm.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

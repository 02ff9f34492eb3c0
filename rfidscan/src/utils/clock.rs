//! Monotonic time source.
//!
//! The firmware measures everything in milliseconds since boot; the
//! orchestrator only ever compares two readings, so any monotonic source
//! works.

use std::time::Instant;

/// Milliseconds since an arbitrary fixed origin (boot).
pub trait Clock {
    fn now_ms(&self) -> u64;

    fn uptime_secs(&self) -> u64 {
        self.now_ms() / 1000
    }
}

/// Wall-clock implementation backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    boot: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.boot.elapsed().as_millis() as u64
    }
}

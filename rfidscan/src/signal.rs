// rfidscan/src/signal.rs
//! Audible feedback through the buzzer.

use serde::Serialize;

use crate::{Error, Result};

/// A beep pattern: `times` beeps of `duration_ms` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeepPattern {
    pub times: u8,
    pub duration_ms: u16,
}

impl BeepPattern {
    /// Played after a delivery that got a 2xx answer.
    pub const SUCCESS: Self = Self {
        times: 1,
        duration_ms: 150,
    };

    /// Played after any other delivery result.
    pub const FAILURE: Self = Self {
        times: 3,
        duration_ms: 100,
    };

    pub const MAX_TIMES: u8 = 10;
    pub const MIN_DURATION_MS: u16 = 10;
    pub const MAX_DURATION_MS: u16 = 2000;

    /// Validated pattern for the control plane's buzzer test.
    pub fn new(times: u8, duration_ms: u16) -> Result<Self> {
        if !(1..=Self::MAX_TIMES).contains(&times) {
            return Err(Error::InvalidParameter {
                name: "times",
                reason: format!("{} not in 1..={}", times, Self::MAX_TIMES),
            });
        }
        if !(Self::MIN_DURATION_MS..=Self::MAX_DURATION_MS).contains(&duration_ms) {
            return Err(Error::InvalidParameter {
                name: "duration",
                reason: format!(
                    "{} not in {}..={}",
                    duration_ms,
                    Self::MIN_DURATION_MS,
                    Self::MAX_DURATION_MS
                ),
            });
        }
        Ok(Self { times, duration_ms })
    }

    /// Total time the pattern occupies, gaps included.
    pub fn total_ms(&self) -> u64 {
        let on = self.times as u64 * self.duration_ms as u64;
        let gaps = self.times.saturating_sub(1) as u64 * self.duration_ms as u64;
        on + gaps
    }
}

/// Buzzer collaborator.
pub trait Signal {
    fn play(&mut self, pattern: BeepPattern);
}

/// A signal that makes no sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSignal;

impl Signal for SilentSignal {
    fn play(&mut self, _pattern: BeepPattern) {}
}

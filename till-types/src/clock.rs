//! Injected wall clock.
//!
//! Validation emits warnings relative to "now". Reading the system clock
//! inside the validator would make those warnings untestable, so callers
//! hand the engine a [`Clock`] instead.

use crate::Millis;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> Millis;
}

/// Reads the operating system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        // A clock set before 1970 reads as the epoch; one past i64 saturates.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| Millis::try_from(d.as_millis()).unwrap_or(Millis::MAX))
            .unwrap_or(0)
    }
}

/// A clock frozen at a single instant (tests and replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Millis);

impl FixedClock {
    #[must_use]
    pub const fn new(now: Millis) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> Millis {
        self.0
    }
}

//! Clock abstraction for determinism.
//!
//! Event timestamps come from an injected clock so that tests can pin
//! time instead of reading the wall clock.

use chrono::{DateTime, Utc};

/// Abstraction over the source of event timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

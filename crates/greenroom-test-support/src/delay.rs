//! Test delay policies — deterministic `DelayPolicy` implementations.

use std::time::Duration;

use greenroom_core::delay::{DelayPolicy, DelayRange};

/// A policy that always returns the lower bound of the requested range.
/// Suitable for tests that do not depend on specific delay values.
#[derive(Debug, Default)]
pub struct MinDelayPolicy;

impl DelayPolicy for MinDelayPolicy {
    fn sample(&mut self, range: DelayRange) -> Duration {
        range.min
    }
}

/// A policy that returns delays from a predetermined sequence. Panics if
/// the sequence is exhausted. Used in tests that need specific, repeatable
/// pacing (e.g., boundary timings in the replay driver).
#[derive(Debug)]
pub struct SequenceDelayPolicy {
    delays: Vec<Duration>,
    index: usize,
}

impl SequenceDelayPolicy {
    /// Create a new `SequenceDelayPolicy` with the given delays.
    #[must_use]
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays, index: 0 }
    }

    /// Create a new `SequenceDelayPolicy` from millisecond values.
    #[must_use]
    pub fn from_millis(millis: &[u64]) -> Self {
        Self::new(millis.iter().copied().map(Duration::from_millis).collect())
    }
}

impl DelayPolicy for SequenceDelayPolicy {
    fn sample(&mut self, _range: DelayRange) -> Duration {
        let delay = self.delays[self.index];
        self.index += 1;
        delay
    }
}

//! Delay-generation policy for human-like pacing.
//!
//! Production code draws randomized delays from a bounded range. Tests
//! inject a deterministic implementation instead of relying on real
//! randomness or real wall-clock waits.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half-open interval `[min, max)` that a delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    /// Inclusive lower bound.
    pub min: Duration,
    /// Exclusive upper bound.
    pub max: Duration,
}

impl DelayRange {
    /// Creates a range from millisecond bounds.
    #[must_use]
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }
}

/// Abstraction over delay generation.
pub trait DelayPolicy: Send {
    /// Draws the next delay from `range`.
    fn sample(&mut self, range: DelayRange) -> Duration;
}

/// Production policy drawing uniformly distributed delays.
#[derive(Debug)]
pub struct UniformDelayPolicy {
    rng: StdRng,
}

impl UniformDelayPolicy {
    /// Creates a policy seeded from operating-system entropy.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a policy with a fixed seed, for reproducible replays.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DelayPolicy for UniformDelayPolicy {
    fn sample(&mut self, range: DelayRange) -> Duration {
        let min = u64::try_from(range.min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(range.max.as_millis()).unwrap_or(u64::MAX);
        // An empty or inverted range degenerates to the lower bound.
        if max <= min {
            return range.min;
        }
        Duration::from_millis(self.rng.random_range(min..max))
    }
}

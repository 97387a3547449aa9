//! Shared test mocks and utilities for the Greenroom funnel engine.

mod actions;
mod clock;
mod delay;

pub use actions::{ExternalCall, RecordingActions};
pub use clock::FixedClock;
pub use delay::{MinDelayPolicy, SequenceDelayPolicy};

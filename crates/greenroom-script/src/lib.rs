//! Greenroom — Script Store bounded context.
//!
//! Static, ordered message definitions that drive the simulated
//! conversation. Scripts are caller-guaranteed input: parsing is the
//! only validation point, and a constructed script is immutable.

pub mod message;
pub mod samples;
pub mod script;

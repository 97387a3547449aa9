//! Greenroom — funnel session composition.
//!
//! Wires the conversation replay and the engagement gate into one running
//! session, routes user intents to the gate, and performs outbound side
//! effects through the `ExternalActions` port.

pub mod config;
pub mod session;

//! Domain layer for the Conversation Replay context.

pub mod aggregates;
pub mod events;

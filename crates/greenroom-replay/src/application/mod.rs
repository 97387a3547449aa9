//! Application layer for the Conversation Replay context.

pub mod driver;
pub mod query_handlers;

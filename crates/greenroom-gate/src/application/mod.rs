//! Application layer for the Engagement Gate context.

pub mod command_handlers;
pub mod query_handlers;
pub mod reveal;
pub mod state;

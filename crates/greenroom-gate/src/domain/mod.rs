//! Domain layer for the Engagement Gate context.

pub mod aggregates;
pub mod commands;
pub mod events;

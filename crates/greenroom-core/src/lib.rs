//! Greenroom Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that all bounded
//! contexts depend on. It contains no infrastructure code.

pub mod actions;
pub mod aggregate;
pub mod clock;
pub mod delay;
pub mod error;
pub mod event;

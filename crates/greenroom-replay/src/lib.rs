//! Greenroom — Conversation Replay bounded context.
//!
//! Responsible for replaying a fixed message script into a live transcript
//! with human-paced delays and typing indicators ahead of peer messages.

pub mod application;
pub mod domain;

//! Greenroom — Engagement Gate bounded context.
//!
//! Responsible for the join call-to-action reveal, the share gate that
//! replaces the conversation view, and the bounded share counter whose
//! quota crossing triggers the terminal redirect.

pub mod application;
pub mod domain;

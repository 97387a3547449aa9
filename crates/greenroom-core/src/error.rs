//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// The funnel core has a deliberately small failure domain: delays and
/// timers are not operations that can fail, and there is no storage or
/// network surface. What remains is caller misuse of an aggregate's
/// protocol and unparseable script input.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A domain rule was violated by the caller.
    #[error("validation error: {0}")]
    Validation(String),

    /// Script input that could not be parsed.
    #[error("malformed script: {0}")]
    MalformedScript(String),
}

//! Commands for the Engagement Gate context.

use uuid::Uuid;

/// Command to reveal the join call-to-action.
#[derive(Debug, Clone)]
pub struct RevealCallToAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session whose call-to-action is revealed.
    pub session_id: Uuid,
}

/// Command to open the share gate over the conversation view.
#[derive(Debug, Clone)]
pub struct OpenGate {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session whose gate is opened.
    pub session_id: Uuid,
}

/// Command to record one completed share.
#[derive(Debug, Clone)]
pub struct RecordShare {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session the share counts toward.
    pub session_id: Uuid,
}

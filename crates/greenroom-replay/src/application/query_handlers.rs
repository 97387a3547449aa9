//! Query handlers for the Conversation Replay context.
//!
//! Read-only projections of the replay aggregate. The driver publishes a
//! fresh snapshot after every commit, so observers render from snapshots
//! and never touch the aggregate itself.

use serde::Serialize;
use uuid::Uuid;

use greenroom_core::aggregate::AggregateRoot;

use crate::domain::aggregates::ConversationReplay;
use crate::domain::events::{DeliveredMessage, TypingSignal};

/// Read-only view of a conversation replay aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySnapshot {
    /// The session identifier.
    pub session_id: Uuid,
    /// Messages delivered so far, in delivery order.
    pub transcript: Vec<DeliveredMessage>,
    /// Current typing-indicator state.
    pub typing: TypingSignal,
    /// Whether the whole script has been replayed.
    pub completed: bool,
    /// Current version (event count).
    pub version: i64,
}

/// Projects the current state of a replay aggregate into a snapshot.
#[must_use]
pub fn snapshot(replay: &ConversationReplay) -> ReplaySnapshot {
    ReplaySnapshot {
        session_id: replay.session_id(),
        transcript: replay.transcript().to_vec(),
        typing: replay.typing().clone(),
        completed: replay.is_completed(),
        version: replay.version(),
    }
}

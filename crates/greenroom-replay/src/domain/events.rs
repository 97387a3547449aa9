//! Domain events for the Conversation Replay context.

use chrono::{DateTime, Utc};
use greenroom_core::event::{DomainEvent, EventMetadata};
use greenroom_script::message::{MessageKind, Sender};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scripted message that has landed in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    /// Stable per-delivery identifier. Taken from the sequence number of
    /// the event that delivered it, so IDs are unique and strictly
    /// increasing within a session, though not necessarily dense.
    pub delivery_id: i64,
    /// Position of the source message within the script.
    pub script_index: usize,
    /// Who the message is attributed to.
    pub sender: Sender,
    /// How the message displays.
    pub kind: MessageKind,
    /// Display payload: text, or an asset reference for images.
    pub content: String,
    /// Avatar reference carried over from the script, if any.
    pub avatar_ref: Option<String>,
    /// When the message entered the transcript.
    pub delivered_at: DateTime<Utc>,
}

/// Typing-indicator state of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingSignal {
    /// Nobody is composing.
    #[default]
    Idle,
    /// A peer is composing the next message.
    Active {
        /// Avatar of the composing peer, when the script names one.
        avatar_ref: Option<String>,
    },
}

/// Emitted when the typing indicator turns on ahead of a peer message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingStarted {
    /// The session this replay belongs to.
    pub session_id: Uuid,
    /// Index of the scripted message being composed.
    pub script_index: usize,
    /// Avatar of the composing peer, when the script names one.
    pub avatar_ref: Option<String>,
}

/// Emitted when the next scripted message lands in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDelivered {
    /// The session this replay belongs to.
    pub session_id: Uuid,
    /// The delivered message, as appended to the transcript.
    pub message: DeliveredMessage,
}

/// Emitted once after the final scripted message has been delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayCompleted {
    /// The session this replay belongs to.
    pub session_id: Uuid,
    /// How many messages were delivered over the whole replay.
    pub delivered_count: usize,
}

/// Event payload variants for the Conversation Replay context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReplayEventKind {
    /// The typing indicator has turned on.
    TypingStarted(TypingStarted),
    /// A scripted message has been delivered.
    MessageDelivered(MessageDelivered),
    /// The whole script has been replayed.
    ReplayCompleted(ReplayCompleted),
}

/// Domain event envelope for the Conversation Replay context.
#[derive(Debug, Clone)]
pub struct ReplayEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ReplayEventKind,
}

impl DomainEvent for ReplayEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ReplayEventKind::TypingStarted(_) => "replay.typing_started",
            ReplayEventKind::MessageDelivered(_) => "replay.message_delivered",
            ReplayEventKind::ReplayCompleted(_) => "replay.completed",
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

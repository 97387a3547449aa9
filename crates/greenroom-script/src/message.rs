//! Message definitions that make up a conversation script.

use serde::{Deserialize, Serialize};

/// Who a scripted message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The viewing user's own side of the conversation.
    Local,
    /// Another participant in the group.
    Peer,
    /// The platform itself (join notices and similar).
    System,
}

/// What a scripted message displays as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain chat text.
    Text,
    /// An image attachment; the content is an asset reference.
    Image,
    /// An inline notice rendered by the chat chrome, not a bubble.
    SystemNotice,
}

/// A single immutable entry of a conversation script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedMessage {
    /// Who the message is attributed to.
    pub sender: Sender,
    /// How the message displays.
    pub kind: MessageKind,
    /// Display payload: text, or an asset reference for images.
    pub content: String,
    /// Avatar shown while this participant is "typing", if any.
    pub avatar_ref: Option<String>,
}

//! Aggregate roots for the Conversation Replay context.

use greenroom_core::aggregate::AggregateRoot;
use greenroom_core::clock::Clock;
use greenroom_core::error::DomainError;
use greenroom_core::event::EventMetadata;
use greenroom_script::message::{MessageKind, Sender, ScriptedMessage};
use greenroom_script::script::Script;
use std::sync::Arc;
use uuid::Uuid;

use super::events::{
    DeliveredMessage, MessageDelivered, ReplayCompleted, ReplayEvent, ReplayEventKind,
    TypingSignal, TypingStarted,
};

/// Whether a scripted message gets a visible composing pause before it is
/// delivered. Only peer chat content shows the indicator; local messages
/// and system notices land without one, matching how a live client reads.
#[must_use]
pub fn requires_typing_phase(message: &ScriptedMessage) -> bool {
    match (message.sender, message.kind) {
        (Sender::Peer, MessageKind::Text | MessageKind::Image) => true,
        (Sender::Peer, MessageKind::SystemNotice) | (Sender::Local | Sender::System, _) => false,
    }
}

/// The aggregate root for one scripted conversation replay.
#[derive(Debug)]
pub struct ConversationReplay {
    /// Aggregate identifier, shared with the owning session.
    pub id: Uuid,
    /// Current version (event count).
    version: i64,
    /// The immutable script being replayed.
    script: Arc<Script>,
    /// Messages delivered so far, in delivery order.
    transcript: Vec<DeliveredMessage>,
    /// Current typing-indicator state.
    typing: TypingSignal,
    /// Whether the whole script has been replayed.
    completed: bool,
    /// Uncommitted events pending publication.
    uncommitted_events: Vec<ReplayEvent>,
}

impl ConversationReplay {
    /// Creates a replay at the start of `script`, with nothing delivered.
    #[must_use]
    pub fn new(id: Uuid, script: Arc<Script>) -> Self {
        Self {
            id,
            version: 0,
            script,
            transcript: Vec::new(),
            typing: TypingSignal::Idle,
            completed: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the script this replay walks through.
    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Returns the messages delivered so far, in delivery order.
    #[must_use]
    pub fn transcript(&self) -> &[DeliveredMessage] {
        &self.transcript
    }

    /// Returns the current typing-indicator state.
    #[must_use]
    pub fn typing(&self) -> &TypingSignal {
        &self.typing
    }

    /// Returns whether the whole script has been replayed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the script index the next delivery will draw from, counting
    /// deliveries that are still uncommitted.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.transcript.len()
            + self
                .uncommitted_events
                .iter()
                .filter(|event| matches!(event.kind, ReplayEventKind::MessageDelivered(_)))
                .count()
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn new_event(
        &self,
        event_type: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
        kind: ReplayEventKind,
    ) -> ReplayEvent {
        ReplayEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                session_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        }
    }

    /// Turns the typing indicator on ahead of the next scripted message,
    /// producing a `TypingStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the replay already completed,
    /// the script is exhausted, or the next message has no typing phase.
    pub fn begin_typing(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.completed {
            return Err(DomainError::Validation(
                "replay already completed".to_owned(),
            ));
        }
        let index = self.next_index();
        let Some(message) = self.script.get(index) else {
            return Err(DomainError::Validation(format!(
                "no scripted message at index {index}"
            )));
        };
        if !requires_typing_phase(message) {
            return Err(DomainError::Validation(format!(
                "message at index {index} has no typing phase"
            )));
        }

        let event = self.new_event(
            "replay.typing_started",
            correlation_id,
            clock,
            ReplayEventKind::TypingStarted(TypingStarted {
                session_id: self.id,
                script_index: index,
                avatar_ref: message.avatar_ref.clone(),
            }),
        );
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Delivers the next scripted message into the transcript, producing a
    /// `MessageDelivered` event. The delivery ID is the sequence number of
    /// that event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the replay already completed or
    /// the script is exhausted.
    pub fn deliver_next(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.completed {
            return Err(DomainError::Validation(
                "replay already completed".to_owned(),
            ));
        }
        let index = self.next_index();
        let Some(message) = self.script.get(index) else {
            return Err(DomainError::Validation(format!(
                "no scripted message at index {index}"
            )));
        };

        let delivered = DeliveredMessage {
            delivery_id: self.next_sequence_number(),
            script_index: index,
            sender: message.sender,
            kind: message.kind,
            content: message.content.clone(),
            avatar_ref: message.avatar_ref.clone(),
            delivered_at: clock.now(),
        };
        let event = self.new_event(
            "replay.message_delivered",
            correlation_id,
            clock,
            ReplayEventKind::MessageDelivered(MessageDelivered {
                session_id: self.id,
                message: delivered,
            }),
        );
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Marks the replay finished, producing a `ReplayCompleted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the replay already completed or
    /// scripted messages remain undelivered.
    pub fn complete(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.completed {
            return Err(DomainError::Validation(
                "replay already completed".to_owned(),
            ));
        }
        if self.next_index() < self.script.len() {
            let remaining = self.script.len() - self.next_index();
            return Err(DomainError::Validation(format!(
                "replay still has {remaining} undelivered messages"
            )));
        }

        let event = self.new_event(
            "replay.completed",
            correlation_id,
            clock,
            ReplayEventKind::ReplayCompleted(ReplayCompleted {
                session_id: self.id,
                delivered_count: self.next_index(),
            }),
        );
        self.uncommitted_events.push(event);
        Ok(())
    }
}

impl AggregateRoot for ConversationReplay {
    type Event = ReplayEvent;

    fn session_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ReplayEventKind::TypingStarted(payload) => {
                self.typing = TypingSignal::Active {
                    avatar_ref: payload.avatar_ref.clone(),
                };
            }
            ReplayEventKind::MessageDelivered(payload) => {
                self.typing = TypingSignal::Idle;
                self.transcript.push(payload.message.clone());
            }
            ReplayEventKind::ReplayCompleted(_) => {
                self.typing = TypingSignal::Idle;
                self.completed = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

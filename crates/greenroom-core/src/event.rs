//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for logging and feed routing.
    pub event_type: String,
    /// Session whose stream this event belongs to.
    pub session_id: Uuid,
    /// Monotonically increasing position within the stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing an intent or replay run through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the intent that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for logging and feed routing).
    fn event_type(&self) -> &'static str;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

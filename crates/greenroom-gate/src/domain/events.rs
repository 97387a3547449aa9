//! Domain events for the Engagement Gate context.

use greenroom_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when the join call-to-action becomes visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToActionRevealed {
    /// The session whose call-to-action was revealed.
    pub session_id: Uuid,
}

/// Emitted when the share gate replaces the conversation view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateOpened {
    /// The session whose gate was opened.
    pub session_id: Uuid,
}

/// Emitted for every recorded share, with the count clamped at the quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRecorded {
    /// The session the share counts toward.
    pub session_id: Uuid,
    /// The share count after this share, never above the quota.
    pub share_count: u32,
    /// The quota the count is climbing toward.
    pub share_quota: u32,
}

/// Emitted exactly once, when the share count first reaches the quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareQuotaReached {
    /// The session that reached its quota.
    pub session_id: Uuid,
    /// The share count at the moment of crossing.
    pub share_count: u32,
}

/// Event payload variants for the Engagement Gate context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GateEventKind {
    /// The join call-to-action has been revealed.
    CallToActionRevealed(CallToActionRevealed),
    /// The share gate has been opened.
    GateOpened(GateOpened),
    /// A share has been recorded.
    ShareRecorded(ShareRecorded),
    /// The share quota has been reached.
    ShareQuotaReached(ShareQuotaReached),
}

/// Domain event envelope for the Engagement Gate context.
#[derive(Debug, Clone)]
pub struct GateEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GateEventKind,
}

impl DomainEvent for GateEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            GateEventKind::CallToActionRevealed(_) => "gate.call_to_action_revealed",
            GateEventKind::GateOpened(_) => "gate.opened",
            GateEventKind::ShareRecorded(_) => "gate.share_recorded",
            GateEventKind::ShareQuotaReached(_) => "gate.share_quota_reached",
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

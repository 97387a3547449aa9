//! Query handlers for the Engagement Gate context.
//!
//! Read-only projections of the gate aggregate, published through a watch
//! channel after every commit.

use serde::Serialize;
use uuid::Uuid;

use greenroom_core::aggregate::AggregateRoot;

use crate::domain::aggregates::EngagementGate;

/// Read-only view of an engagement gate aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct GateSnapshot {
    /// The session identifier.
    pub session_id: Uuid,
    /// Whether the join call-to-action has been revealed.
    pub call_to_action_revealed: bool,
    /// Whether the share gate has replaced the conversation view.
    pub gate_open: bool,
    /// Shares recorded so far, clamped at the quota.
    pub share_count: u32,
    /// The quota the share count climbs toward.
    pub share_quota: u32,
    /// Whether the quota crossing has happened.
    pub quota_reached: bool,
    /// Current version (event count).
    pub version: i64,
}

/// Projects the current state of a gate aggregate into a snapshot.
#[must_use]
pub fn snapshot(gate: &EngagementGate) -> GateSnapshot {
    GateSnapshot {
        session_id: gate.session_id(),
        call_to_action_revealed: gate.is_call_to_action_revealed(),
        gate_open: gate.is_gate_open(),
        share_count: gate.share_count(),
        share_quota: gate.share_quota(),
        quota_reached: gate.is_quota_reached(),
        version: gate.version(),
    }
}

//! Command handlers for the Engagement Gate context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: lock the shared gate, execute the command,
//! publish the committed events and a fresh snapshot.

use greenroom_core::aggregate::commit;
use greenroom_core::clock::Clock;
use greenroom_core::error::DomainError;
use greenroom_core::event::DomainEvent;

use crate::application::query_handlers;
use crate::application::state::GateHandle;
use crate::domain::aggregates::EngagementGate;
use crate::domain::commands::{OpenGate, RecordShare, RevealCallToAction};
use crate::domain::events::GateEvent;

fn publish(gate: &mut EngagementGate, state: &GateHandle) -> Vec<GateEvent> {
    let events = commit(gate);
    for event in &events {
        tracing::debug!(
            session_id = %state.session_id(),
            event_type = event.event_type(),
            sequence_number = event.metadata.sequence_number,
            "gate event committed"
        );
        let _ = state.events.send(event.clone());
    }
    let _ = state.snapshots.send(query_handlers::snapshot(gate));
    events
}

/// Handles `RevealCallToAction`: flips the one-shot reveal flag and
/// publishes the resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the call-to-action was already
/// revealed.
pub async fn handle_reveal_call_to_action(
    command: &RevealCallToAction,
    state: &GateHandle,
    clock: &dyn Clock,
) -> Result<Vec<GateEvent>, DomainError> {
    let mut gate = state.gate.lock().await;
    gate.reveal_call_to_action(command.correlation_id, clock)?;
    Ok(publish(&mut gate, state))
}

/// Handles `OpenGate`: swaps the conversation view for the share gate and
/// publishes the resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the gate is already open.
pub async fn handle_open_gate(
    command: &OpenGate,
    state: &GateHandle,
    clock: &dyn Clock,
) -> Result<Vec<GateEvent>, DomainError> {
    let mut gate = state.gate.lock().await;
    gate.open_gate(command.correlation_id, clock)?;
    Ok(publish(&mut gate, state))
}

/// Handles `RecordShare`: bumps the bounded share counter and publishes
/// the resulting events. On the share that first reaches the quota the
/// returned events also carry the `ShareQuotaReached` crossing. Recording
/// a share cannot fail; the external action is trusted to have happened.
pub async fn handle_record_share(
    command: &RecordShare,
    state: &GateHandle,
    clock: &dyn Clock,
) -> Vec<GateEvent> {
    let mut gate = state.gate.lock().await;
    gate.record_share(command.correlation_id, clock);
    publish(&mut gate, state)
}

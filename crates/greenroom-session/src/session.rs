//! The running funnel session.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use greenroom_core::actions::ExternalActions;
use greenroom_core::clock::Clock;
use greenroom_core::delay::DelayPolicy;
use greenroom_core::error::DomainError;
use greenroom_gate::application::command_handlers::{handle_open_gate, handle_record_share};
use greenroom_gate::application::query_handlers::GateSnapshot;
use greenroom_gate::application::reveal::spawn_reveal_timer;
use greenroom_gate::application::state::GateHandle;
use greenroom_gate::domain::commands::{OpenGate, RecordShare};
use greenroom_gate::domain::events::{GateEvent, GateEventKind};
use greenroom_replay::application::driver::spawn_replay;
use greenroom_replay::application::query_handlers::ReplaySnapshot;
use greenroom_replay::domain::events::ReplayEvent;
use greenroom_script::script::Script;

use crate::config::SessionConfig;

/// Combined read-only view of a running session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Current state of the conversation replay.
    pub replay: ReplaySnapshot,
    /// Current state of the engagement gate.
    pub gate: GateSnapshot,
}

/// One running funnel session: the conversation replay, the reveal timer,
/// and the engagement gate, sharing a cancellation token.
///
/// Observers watch the snapshot channels for current state and drain the
/// event feeds for ordered transitions. Dropping the session cancels its
/// workers; [`FunnelSession::teardown`] additionally waits for them to
/// finish.
pub struct FunnelSession {
    session_id: Uuid,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    actions: Arc<dyn ExternalActions>,
    gate: Arc<GateHandle>,
    replay_snapshots: watch::Receiver<ReplaySnapshot>,
    gate_snapshots: watch::Receiver<GateSnapshot>,
    replay_events: Option<mpsc::UnboundedReceiver<ReplayEvent>>,
    gate_events: Option<mpsc::UnboundedReceiver<GateEvent>>,
    replay_handle: JoinHandle<()>,
    reveal_handle: JoinHandle<()>,
    cancel_token: CancellationToken,
    _cancel_guard: DropGuard,
}

impl FunnelSession {
    /// Boots the replay worker and the reveal timer for a new session.
    #[must_use]
    pub fn start(
        script: Arc<Script>,
        config: SessionConfig,
        clock: Arc<dyn Clock>,
        delays: Box<dyn DelayPolicy>,
        actions: Arc<dyn ExternalActions>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let cancel_token = CancellationToken::new();

        let (replay_event_tx, replay_events) = mpsc::unbounded_channel();
        let (replay_handle, replay_snapshots) = spawn_replay(
            session_id,
            script,
            config.pacing,
            Arc::clone(&clock),
            delays,
            replay_event_tx,
            cancel_token.clone(),
        );

        let (gate_event_tx, gate_events) = mpsc::unbounded_channel();
        let (gate, gate_snapshots) = GateHandle::new(session_id, config.share_quota, gate_event_tx);
        let reveal_handle = spawn_reveal_timer(
            Arc::clone(&gate),
            config.reveal_delay,
            Arc::clone(&clock),
            cancel_token.clone(),
        );

        info!(session_id = %session_id, "funnel session started");

        Self {
            session_id,
            config,
            clock,
            actions,
            gate,
            replay_snapshots,
            gate_snapshots,
            replay_events: Some(replay_events),
            gate_events: Some(gate_events),
            replay_handle,
            reveal_handle,
            _cancel_guard: cancel_token.clone().drop_guard(),
            cancel_token,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns the configuration the session was started with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the combined current view of replay and gate state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            replay: self.replay_snapshots.borrow().clone(),
            gate: self.gate_snapshots.borrow().clone(),
        }
    }

    /// Returns a receiver tracking the conversation transcript.
    #[must_use]
    pub fn subscribe_replay(&self) -> watch::Receiver<ReplaySnapshot> {
        self.replay_snapshots.clone()
    }

    /// Returns a receiver tracking the gate state.
    #[must_use]
    pub fn subscribe_gate(&self) -> watch::Receiver<GateSnapshot> {
        self.gate_snapshots.clone()
    }

    /// Takes the ordered replay event feed. `None` once taken.
    pub fn take_replay_events(&mut self) -> Option<mpsc::UnboundedReceiver<ReplayEvent>> {
        self.replay_events.take()
    }

    /// Takes the ordered gate event feed. `None` once taken.
    pub fn take_gate_events(&mut self) -> Option<mpsc::UnboundedReceiver<GateEvent>> {
        self.gate_events.take()
    }

    /// Handles the user accepting the join call-to-action: opens the join
    /// destination, then swaps the conversation view for the share gate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the gate is already open. The
    /// join destination has been opened by then; like every user intent it
    /// is trusted the moment it arrives.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn join(&self) -> Result<(), DomainError> {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, "handling join intent");

        self.actions
            .open_link(&self.config.destinations.join_url)
            .await;

        let command = OpenGate {
            correlation_id,
            session_id: self.session_id,
        };
        handle_open_gate(&command, &self.gate, self.clock.as_ref()).await?;
        Ok(())
    }

    /// Handles one share: opens the share composer, records the share, and
    /// performs the terminal redirect when this share is the one that
    /// reaches the quota. The redirect fires exactly once per session,
    /// driven by the `ShareQuotaReached` crossing event.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn share(&self) {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, "handling share intent");

        self.actions
            .open_share_composer(&self.config.destinations.share_text)
            .await;

        let command = RecordShare {
            correlation_id,
            session_id: self.session_id,
        };
        let events = handle_record_share(&command, &self.gate, self.clock.as_ref()).await;

        if events
            .iter()
            .any(|event| matches!(event.kind, GateEventKind::ShareQuotaReached(_)))
        {
            info!(correlation_id = %correlation_id, "share quota reached, redirecting");
            self.actions
                .redirect(&self.config.destinations.redirect_url)
                .await;
        }
    }

    /// Handles a tap outside the primary controls, which promotes the join
    /// destination without touching gate state.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn tap(&self) {
        debug!("tap promotion");
        self.actions
            .open_link(&self.config.destinations.join_url)
            .await;
    }

    /// Cancels both workers and waits for them to finish. State observed
    /// through previously obtained receivers stays frozen at its last
    /// published value.
    pub async fn teardown(mut self) {
        info!(session_id = %self.session_id, "tearing down funnel session");
        self.cancel_token.cancel();
        if let Err(error) = (&mut self.replay_handle).await {
            warn!(session_id = %self.session_id, %error, "replay worker ended abnormally");
        }
        if let Err(error) = (&mut self.reveal_handle).await {
            warn!(session_id = %self.session_id, %error, "reveal timer ended abnormally");
        }
    }
}

//! Shared gate state for the application layer.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use uuid::Uuid;

use crate::application::query_handlers::{self, GateSnapshot};
use crate::domain::aggregates::EngagementGate;
use crate::domain::events::GateEvent;

/// Engagement gate shared between intent handlers and the reveal timer.
///
/// The aggregate sits behind an async mutex. Handlers hold the lock only
/// for the synchronous steps of one command and never across another
/// await, so the reveal timer and user intents serialize cleanly.
#[derive(Debug)]
pub struct GateHandle {
    session_id: Uuid,
    pub(crate) gate: Mutex<EngagementGate>,
    pub(crate) snapshots: watch::Sender<GateSnapshot>,
    pub(crate) events: mpsc::UnboundedSender<GateEvent>,
}

impl GateHandle {
    /// Creates a handle around a fresh gate and primes the snapshot channel
    /// with its initial state. Committed events are forwarded to `events`.
    #[must_use]
    pub fn new(
        session_id: Uuid,
        share_quota: u32,
        events: mpsc::UnboundedSender<GateEvent>,
    ) -> (Arc<Self>, watch::Receiver<GateSnapshot>) {
        let gate = EngagementGate::new(session_id, share_quota);
        let (snapshot_tx, snapshot_rx) = watch::channel(query_handlers::snapshot(&gate));
        let handle = Arc::new(Self {
            session_id,
            gate: Mutex::new(gate),
            snapshots: snapshot_tx,
            events,
        });
        (handle, snapshot_rx)
    }

    /// Returns the session this gate belongs to.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

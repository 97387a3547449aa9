//! Replay driver — the background worker that paces the script.
//!
//! The worker exclusively owns the replay aggregate. After every command
//! it commits the pending events, forwards them to the event feed, and
//! publishes a fresh snapshot, so observers see each transition exactly
//! once and in order. Every wait races against the cancellation token,
//! with cancellation winning ties against due timers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use greenroom_core::aggregate::{commit, AggregateRoot};
use greenroom_core::clock::Clock;
use greenroom_core::delay::{DelayPolicy, DelayRange};
use greenroom_core::event::DomainEvent;
use greenroom_script::script::Script;

use crate::application::query_handlers::{self, ReplaySnapshot};
use crate::domain::aggregates::{requires_typing_phase, ConversationReplay};
use crate::domain::events::ReplayEvent;

/// Pacing bounds for a replay. The defaults are tuned so the transcript
/// reads like a live group chat rather than a data dump.
#[derive(Debug, Clone, Copy)]
pub struct ReplayPacing {
    /// Settle time before the first scripted message is processed.
    pub initial_delay: Duration,
    /// Composing pause sampled ahead of each peer message.
    pub typing_delay: DelayRange,
    /// Gap sampled between consecutive deliveries.
    pub message_gap: DelayRange,
}

impl Default for ReplayPacing {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            typing_delay: DelayRange::from_millis(1200, 2700),
            message_gap: DelayRange::from_millis(1500, 2500),
        }
    }
}

/// Spawns the replay worker for `script` and returns its join handle plus
/// a snapshot receiver primed with the empty initial state.
///
/// Domain events are forwarded to `events` in commit order. The worker
/// runs until the script is exhausted or `cancel_token` fires; on
/// cancellation the last published snapshot simply remains current.
#[must_use]
pub fn spawn_replay(
    session_id: Uuid,
    script: Arc<Script>,
    pacing: ReplayPacing,
    clock: Arc<dyn Clock>,
    delays: Box<dyn DelayPolicy>,
    events: mpsc::UnboundedSender<ReplayEvent>,
    cancel_token: CancellationToken,
) -> (JoinHandle<()>, watch::Receiver<ReplaySnapshot>) {
    let replay = ConversationReplay::new(session_id, script);
    let (snapshot_tx, snapshot_rx) = watch::channel(query_handlers::snapshot(&replay));
    let handle = tokio::spawn(replay_worker(
        replay,
        pacing,
        clock,
        delays,
        snapshot_tx,
        events,
        cancel_token,
    ));
    (handle, snapshot_rx)
}

/// Worker that replays the script to completion or cancellation.
pub async fn replay_worker(
    mut replay: ConversationReplay,
    pacing: ReplayPacing,
    clock: Arc<dyn Clock>,
    mut delays: Box<dyn DelayPolicy>,
    snapshots: watch::Sender<ReplaySnapshot>,
    events: mpsc::UnboundedSender<ReplayEvent>,
    cancel_token: CancellationToken,
) {
    let correlation_id = Uuid::new_v4();
    tracing::info!(
        session_id = %replay.session_id(),
        script_len = replay.script().len(),
        "starting conversation replay"
    );

    if !sleep_unless_cancelled(pacing.initial_delay, &cancel_token).await {
        tracing::info!(session_id = %replay.session_id(), "conversation replay shutting down");
        return;
    }

    loop {
        let Some(message) = replay.script().get(replay.next_index()).cloned() else {
            break;
        };

        if requires_typing_phase(&message) {
            if let Err(error) = replay.begin_typing(correlation_id, clock.as_ref()) {
                tracing::error!(session_id = %replay.session_id(), %error, "typing phase rejected");
                return;
            }
            publish(&mut replay, &snapshots, &events);

            let pause = delays.sample(pacing.typing_delay);
            if !sleep_unless_cancelled(pause, &cancel_token).await {
                tracing::info!(
                    session_id = %replay.session_id(),
                    "conversation replay shutting down"
                );
                return;
            }
        }

        if let Err(error) = replay.deliver_next(correlation_id, clock.as_ref()) {
            tracing::error!(session_id = %replay.session_id(), %error, "delivery rejected");
            return;
        }
        publish(&mut replay, &snapshots, &events);

        if replay.next_index() >= replay.script().len() {
            break;
        }

        let gap = delays.sample(pacing.message_gap);
        if !sleep_unless_cancelled(gap, &cancel_token).await {
            tracing::info!(session_id = %replay.session_id(), "conversation replay shutting down");
            return;
        }
    }

    if let Err(error) = replay.complete(correlation_id, clock.as_ref()) {
        tracing::error!(session_id = %replay.session_id(), %error, "completion rejected");
        return;
    }
    publish(&mut replay, &snapshots, &events);
    tracing::info!(
        session_id = %replay.session_id(),
        delivered = replay.transcript().len(),
        "conversation replay completed"
    );
}

/// Commits pending events, forwards them to the feed, and publishes a
/// fresh snapshot. Send failures mean every observer is gone, which is
/// not the worker's problem.
fn publish(
    replay: &mut ConversationReplay,
    snapshots: &watch::Sender<ReplaySnapshot>,
    events: &mpsc::UnboundedSender<ReplayEvent>,
) {
    for event in commit(replay) {
        tracing::debug!(
            session_id = %replay.session_id(),
            event_type = event.event_type(),
            sequence_number = event.metadata.sequence_number,
            "replay event committed"
        );
        let _ = events.send(event);
    }
    let _ = snapshots.send(query_handlers::snapshot(replay));
}

/// Sleeps for `duration` unless the token fires first. Returns `false`
/// when cancelled; cancellation wins ties with a due timer.
async fn sleep_unless_cancelled(duration: Duration, cancel_token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel_token.cancelled() => false,
        () = tokio::time::sleep(duration) => true,
    }
}

//! One-shot reveal timer for the join call-to-action.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use greenroom_core::clock::Clock;

use crate::application::command_handlers;
use crate::application::state::GateHandle;
use crate::domain::commands::RevealCallToAction;

/// Spawns the timer that reveals the join call-to-action after `delay`.
///
/// The timer fires at most once. If `cancel_token` fires first, the
/// call-to-action simply never appears; cancellation wins ties with a
/// due timer.
#[must_use]
pub fn spawn_reveal_timer(
    state: Arc<GateHandle>,
    delay: Duration,
    clock: Arc<dyn Clock>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = cancel_token.cancelled() => {
                tracing::info!(session_id = %state.session_id(), "reveal timer shutting down");
                return;
            }
            () = tokio::time::sleep(delay) => {}
        }

        let command = RevealCallToAction {
            correlation_id: Uuid::new_v4(),
            session_id: state.session_id(),
        };
        match command_handlers::handle_reveal_call_to_action(&command, &state, clock.as_ref()).await
        {
            Ok(_) => {
                tracing::info!(session_id = %state.session_id(), "call to action revealed");
            }
            Err(error) => {
                tracing::error!(
                    session_id = %state.session_id(),
                    %error,
                    "call-to-action reveal rejected"
                );
            }
        }
    })
}

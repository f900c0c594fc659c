//! Runs a debate on behalf of a session and settles its final phase

use log::{info, warn};
use std::sync::Arc;

use super::store::{SessionId, SessionStore};
use crate::features::debate::{
    DebateEvent, DebateOrchestrator, DebateOutcome, DebateRequest, EventSender,
};

/// Drive one debate for `session_id`, recording turns into the store.
///
/// The session phase is updated before the terminal event is sent, so a page
/// reloaded on `complete` always sees the finished transcript.
pub async fn run_session_debate(
    store: SessionStore,
    session_id: SessionId,
    epoch: u64,
    orchestrator: Arc<DebateOrchestrator>,
    request: DebateRequest,
    events: EventSender,
) -> DebateOutcome {
    let outcome = orchestrator
        .run_debate(&request, &events, |turn| {
            store.record_turn(session_id, epoch, turn)
        })
        .await;

    store.with_session(session_id, |state| state.finish(epoch, &outcome));

    let terminal = match &outcome {
        DebateOutcome::Completed(transcript) => Some(DebateEvent::Complete {
            turns: transcript.len(),
        }),
        DebateOutcome::Failed { error, .. } => {
            warn!("Debate for session {} halted: {}", session_id, error);
            Some(DebateEvent::Failed {
                message: error.user_message(),
            })
        }
        DebateOutcome::Superseded => {
            info!("Debate for session {} was superseded", session_id);
            None
        }
    };

    if let Some(event) = terminal {
        // The page may already be gone
        let _ = events.send(event).await;
    }

    outcome
}

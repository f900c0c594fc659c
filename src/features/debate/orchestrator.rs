//! # Debate Orchestrator
//!
//! Drives the rounds of a debate: advocate then opponent, each rebutting the
//! turn immediately before it.

use log::{debug, error, info, warn};
use std::ops::ControlFlow;
use std::sync::Arc;

use super::events::{DebateEvent, EventSender};
use super::generator::ArgumentGenerator;
use super::transcript::{Role, Rounds, Transcript, Turn};
use crate::core::{log_preview, GenerationError};
use crate::features::presentation::Typewriter;

/// What to debate and for how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateRequest {
    pub topic: String,
    pub rounds: Rounds,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum DebateOutcome {
    /// Every round finished
    Completed(Transcript),
    /// A generation call failed; the transcript holds only the turns produced before it
    Failed {
        error: GenerationError,
        transcript: Transcript,
    },
    /// The recorder refused a turn because the session moved on
    Superseded,
}

/// Runs debates against an argument generator
pub struct DebateOrchestrator {
    generator: Arc<dyn ArgumentGenerator>,
    typewriter: Typewriter,
}

impl DebateOrchestrator {
    pub fn new(generator: Arc<dyn ArgumentGenerator>, typewriter: Typewriter) -> Self {
        Self {
            generator,
            typewriter,
        }
    }

    /// Run every round of a debate.
    ///
    /// Each produced turn is handed to `record` before it is revealed on the
    /// event channel. `record` returning `Break` stops the run. Terminal events
    /// (`Complete`/`Failed`) are left to the caller, which owns the session.
    pub async fn run_debate<F>(
        &self,
        request: &DebateRequest,
        events: &EventSender,
        mut record: F,
    ) -> DebateOutcome
    where
        F: FnMut(&Turn) -> ControlFlow<()>,
    {
        let total_rounds = request.rounds.get();
        info!(
            "Starting debate on '{}' ({} rounds)",
            request.topic, total_rounds
        );

        let mut transcript = Transcript::new();

        for round in 1..=total_rounds {
            emit(events, DebateEvent::RoundStarted { round, total_rounds }).await;

            for role in [Role::Advocate, Role::Opponent] {
                debug!("Round {}/{}: {} responding", round, total_rounds, role);
                emit(events, DebateEvent::TurnStarted { round, role }).await;

                // Only the immediately preceding turn is given as context
                let previous = transcript.last().map(|t| t.argument.as_str().to_string());

                let argument = match self
                    .generator
                    .generate(role, &request.topic, previous.as_deref())
                    .await
                {
                    Ok(a) => a,
                    Err(e) => {
                        error!(
                            "Failed to get {} argument for round {}: {}",
                            role, round, e
                        );
                        return DebateOutcome::Failed {
                            error: e,
                            transcript,
                        };
                    }
                };

                let turn = match transcript.push(role, argument) {
                    Ok(turn) => turn.clone(),
                    Err(e) => {
                        warn!("Rejected turn: {e}");
                        return DebateOutcome::Superseded;
                    }
                };

                if record(&turn).is_break() {
                    info!(
                        "Debate on '{}' superseded during round {}",
                        request.topic, round
                    );
                    return DebateOutcome::Superseded;
                }

                self.typewriter
                    .play(round, role, turn.argument.as_str(), events)
                    .await;

                debug!("{} said: {}", role, log_preview(turn.argument.as_str()));
                emit(
                    events,
                    DebateEvent::TurnComplete {
                        round,
                        role,
                        text: turn.argument.as_str().to_string(),
                    },
                )
                .await;
            }
        }

        info!(
            "Debate completed on '{}' ({} turns)",
            request.topic,
            transcript.len()
        );
        DebateOutcome::Completed(transcript)
    }
}

/// Send an event, ignoring a closed receiver so the debate still finishes
async fn emit(events: &EventSender, event: DebateEvent) {
    if events.send(event).await.is_err() {
        debug!("Event receiver closed; debate continues without rendering");
    }
}

//! # Session State
//!
//! Per-browser debate state and its lifecycle:
//!
//! ```text
//! Idle --start--> Running --all rounds--> Complete
//!                    |                        |
//!                    +--error--> Failed       |
//!                                  |          |
//!   any phase --topic change--> Idle <--------+
//! ```
//!
//! `Failed --start--> Running` retries from an empty transcript.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use thiserror::Error;

use crate::features::debate::{DebateOutcome, Rounds, Transcript, Turn};
use crate::features::presentation::Vote;

/// Topic prefilled for a brand new session
pub const DEFAULT_TOPIC: &str = "Gen AI is important topic for student.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DebatePhase {
    Idle,
    Running,
    Complete,
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartRejected {
    #[error("a debate topic is required")]
    EmptyTopic,
    #[error("the debate has already started")]
    AlreadyStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("voting opens once the debate has started")]
pub struct VoteRejected;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Topic currently entered
    pub topic: String,
    pub rounds: Rounds,
    pub transcript: Transcript,
    pub phase: DebatePhase,
    /// Topic seen on the previous request; a difference triggers a reset
    pub last_topic: String,
    /// Set once a run has been shown through the streamed typewriter
    pub interacted: bool,
    pub vote: Option<Vote>,
    /// Bumped on every reset so in-flight runs can detect they are stale
    pub epoch: u64,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            rounds: Rounds::default(),
            transcript: Transcript::new(),
            phase: DebatePhase::Idle,
            last_topic: String::new(),
            interacted: false,
            vote: None,
            epoch: 0,
            created_at: now,
            last_seen: now,
        }
    }

    /// True while a debate is running or after it completed
    pub fn started(&self) -> bool {
        matches!(self.phase, DebatePhase::Running | DebatePhase::Complete)
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    /// Record the topic input. Clears all debate state when it differs from
    /// the last recorded topic. Returns whether a reset happened.
    pub fn apply_topic(&mut self, topic: &str) -> bool {
        self.topic = topic.to_string();
        if topic == self.last_topic {
            return false;
        }

        debug!("Topic changed to '{}', resetting session", topic);
        self.last_topic = topic.to_string();
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.transcript.clear();
        self.phase = DebatePhase::Idle;
        self.interacted = false;
        self.vote = None;
        self.epoch += 1;
    }

    /// Move to `Running` if allowed. Returns the epoch the run belongs to.
    pub fn try_start(&mut self, rounds: Rounds) -> Result<u64, StartRejected> {
        if self.topic.trim().is_empty() {
            return Err(StartRejected::EmptyTopic);
        }
        if self.started() {
            return Err(StartRejected::AlreadyStarted);
        }

        if matches!(self.phase, DebatePhase::Failed { .. }) {
            self.reset();
        }

        self.rounds = rounds;
        self.phase = DebatePhase::Running;
        self.interacted = false;
        Ok(self.epoch)
    }

    /// Append a turn produced by the run of `epoch`. `Break` means the run is stale.
    pub fn record_turn(&mut self, epoch: u64, turn: &Turn) -> ControlFlow<()> {
        if epoch != self.epoch || self.phase != DebatePhase::Running {
            return ControlFlow::Break(());
        }

        match self.transcript.push(turn.role, turn.argument.clone()) {
            Ok(_) => ControlFlow::Continue(()),
            Err(e) => {
                debug!("Dropping turn for stale run: {e}");
                ControlFlow::Break(())
            }
        }
    }

    /// Apply the outcome of the run of `epoch`; stale outcomes are ignored.
    ///
    /// A finished run has been shown by the typewriter, so the session counts
    /// as interacted from here on.
    pub fn finish(&mut self, epoch: u64, outcome: &DebateOutcome) {
        if epoch != self.epoch || self.phase != DebatePhase::Running {
            return;
        }

        match outcome {
            DebateOutcome::Completed(_) => {
                self.phase = DebatePhase::Complete;
                self.interacted = true;
            }
            DebateOutcome::Failed { error, .. } => {
                self.transcript.truncate_to_completed_rounds();
                self.phase = DebatePhase::Failed {
                    message: error.user_message(),
                };
                self.interacted = true;
            }
            DebateOutcome::Superseded => {}
        }
    }

    /// Whether the stored transcript should be drawn on this render.
    ///
    /// While running, the page shows the streamed typewriter instead.
    pub fn should_render_history(&self) -> bool {
        self.interacted && !self.transcript.is_empty()
    }

    pub fn cast_vote(&mut self, vote: Vote) -> Result<(), VoteRejected> {
        if !self.started() {
            return Err(VoteRejected);
        }
        self.vote = Some(vote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GenerationError;
    use crate::features::debate::{Argument, Role};

    fn turn(round: u8, role: Role, text: &str) -> Turn {
        Turn {
            round,
            role,
            argument: Argument::new(text),
        }
    }

    fn running(topic: &str) -> (SessionState, u64) {
        let mut state = SessionState::new();
        state.apply_topic(topic);
        let epoch = state.try_start(Rounds::clamped(2)).unwrap();
        (state, epoch)
    }

    #[test]
    fn test_new_session_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.phase, DebatePhase::Idle);
        assert!(!state.started());
        assert!(state.transcript.is_empty());
        assert_eq!(state.rounds.get(), 2);
        assert_eq!(state.topic, DEFAULT_TOPIC);
        assert_eq!(state.last_topic, "");
    }

    #[test]
    fn test_topic_change_resets_everything() {
        let (mut state, epoch) = running("Pineapple on pizza");
        let _ = state.record_turn(epoch, &turn(1, Role::Advocate, "Yes."));
        let _ = state.record_turn(epoch, &turn(1, Role::Opponent, "No."));
        let done = DebateOutcome::Completed(state.transcript.clone());
        state.finish(epoch, &done);
        state.cast_vote(Vote::Pro).unwrap();

        assert!(state.apply_topic("Cats vs dogs"));
        assert!(state.transcript.is_empty());
        assert!(!state.started());
        assert!(!state.interacted);
        assert_eq!(state.vote, None);
        assert_eq!(state.last_topic, "Cats vs dogs");
    }

    #[test]
    fn test_same_topic_keeps_state() {
        let (mut state, epoch) = running("Pineapple on pizza");
        let _ = state.record_turn(epoch, &turn(1, Role::Advocate, "Yes."));

        assert!(!state.apply_topic("Pineapple on pizza"));
        assert_eq!(state.transcript.len(), 1);
        assert!(state.started());
    }

    #[test]
    fn test_start_requires_topic() {
        let mut state = SessionState::new();
        state.apply_topic("   ");
        assert_eq!(
            state.try_start(Rounds::default()),
            Err(StartRejected::EmptyTopic)
        );
        assert_eq!(state.phase, DebatePhase::Idle);
    }

    #[test]
    fn test_restart_while_started_rejected() {
        let (mut state, epoch) = running("Pineapple on pizza");
        assert_eq!(
            state.try_start(Rounds::default()),
            Err(StartRejected::AlreadyStarted)
        );

        state.finish(epoch, &DebateOutcome::Completed(Transcript::new()));
        assert_eq!(state.phase, DebatePhase::Complete);
        assert_eq!(
            state.try_start(Rounds::default()),
            Err(StartRejected::AlreadyStarted)
        );
    }

    #[test]
    fn test_stale_epoch_is_rejected() {
        let (mut state, epoch) = running("Pineapple on pizza");
        state.apply_topic("Something else");
        let new_epoch = state.try_start(Rounds::default()).unwrap();
        assert_ne!(epoch, new_epoch);

        assert!(state
            .record_turn(epoch, &turn(1, Role::Advocate, "old"))
            .is_break());
        assert!(state
            .record_turn(new_epoch, &turn(1, Role::Advocate, "new"))
            .is_continue());
        assert_eq!(state.transcript.len(), 1);

        // A stale completion does not touch the new run
        state.finish(epoch, &DebateOutcome::Completed(Transcript::new()));
        assert_eq!(state.phase, DebatePhase::Running);
    }

    #[test]
    fn test_failure_truncates_partial_round() {
        let (mut state, epoch) = running("Pineapple on pizza");
        let _ = state.record_turn(epoch, &turn(1, Role::Advocate, "a1"));
        let _ = state.record_turn(epoch, &turn(1, Role::Opponent, "o1"));
        let _ = state.record_turn(epoch, &turn(2, Role::Advocate, "a2"));

        state.finish(
            epoch,
            &DebateOutcome::Failed {
                error: GenerationError::EmptyResponse,
                transcript: Transcript::new(),
            },
        );

        assert_eq!(state.transcript.len(), 2);
        assert!(matches!(state.phase, DebatePhase::Failed { .. }));
        assert!(!state.started());
    }

    #[test]
    fn test_retry_after_failure_clears_transcript() {
        let (mut state, epoch) = running("Pineapple on pizza");
        let _ = state.record_turn(epoch, &turn(1, Role::Advocate, "a1"));
        let _ = state.record_turn(epoch, &turn(1, Role::Opponent, "o1"));
        state.finish(
            epoch,
            &DebateOutcome::Failed {
                error: GenerationError::Network("reset".into()),
                transcript: Transcript::new(),
            },
        );

        let retry_epoch = state.try_start(Rounds::clamped(1)).unwrap();
        assert!(retry_epoch > epoch);
        assert!(state.transcript.is_empty());
        assert_eq!(state.phase, DebatePhase::Running);
        assert_eq!(state.rounds.get(), 1);
    }

    #[test]
    fn test_history_rendered_once_run_finishes() {
        let (mut state, epoch) = running("Pineapple on pizza");
        let _ = state.record_turn(epoch, &turn(1, Role::Advocate, "a1"));
        let _ = state.record_turn(epoch, &turn(1, Role::Opponent, "o1"));
        assert!(!state.should_render_history());

        state.finish(epoch, &DebateOutcome::Completed(Transcript::new()));
        assert!(state.interacted);
        assert!(state.should_render_history());
    }

    #[test]
    fn test_superseded_outcome_leaves_flags() {
        let (mut state, epoch) = running("Pineapple on pizza");
        state.finish(epoch, &DebateOutcome::Superseded);
        assert_eq!(state.phase, DebatePhase::Running);
        assert!(!state.interacted);
    }

    #[test]
    fn test_vote_requires_started() {
        let mut state = SessionState::new();
        assert_eq!(state.cast_vote(Vote::Con), Err(VoteRejected));

        let (mut state, _) = running("Pineapple on pizza");
        state.cast_vote(Vote::Con).unwrap();
        assert_eq!(state.vote, Some(Vote::Con));
    }

    #[test]
    fn test_state_serializes() {
        let (state, _) = running("Pineapple on pizza");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"]["phase"], "running");
        assert_eq!(json["topic"], "Pineapple on pizza");
    }
}

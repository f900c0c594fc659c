//! # Debate Events
//!
//! Progress notifications emitted while a debate runs. The web layer forwards
//! them to the browser as Server-Sent Events with a JSON payload:
//!
//! ```text
//! data: {"type":"partial","round":1,"role":"advocate","text":"Pineapple adds"}
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::transcript::Role;

/// Channel capacity for a single debate's event stream
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events sent from the orchestrator to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebateEvent {
    /// A round begins
    RoundStarted { round: u8, total_rounds: u8 },
    /// A debater starts speaking; the page opens an empty bubble
    TurnStarted { round: u8, role: Role },
    /// Cumulative text revealed so far by the typewriter
    Partial { round: u8, role: Role, text: String },
    /// The full argument, already recorded in the transcript
    TurnComplete { round: u8, role: Role, text: String },
    /// All rounds finished
    Complete { turns: usize },
    /// Generation failed and the debate was halted
    Failed { message: String },
    /// Start was triggered while a debate is already running or done
    AlreadyStarted,
}

impl DebateEvent {
    /// Whether no further events follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DebateEvent::Complete { .. } | DebateEvent::Failed { .. } | DebateEvent::AlreadyStarted
        )
    }
}

pub type EventSender = mpsc::Sender<DebateEvent>;
pub type EventReceiver = mpsc::Receiver<DebateEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

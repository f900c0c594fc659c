//! # Debate Feature
//!
//! Alternating PRO/CON debates on a user supplied topic.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Progress events replace direct rendering; typed generation errors
//! - 1.1.0: Added transcript export
//! - 1.0.0: Initial implementation with one-sentence arguments

pub mod events;
pub mod generator;
pub mod orchestrator;
pub mod transcript;

pub use events::{event_channel, DebateEvent, EventReceiver, EventSender};
pub use generator::{build_argument_prompt, ArgumentGenerator, OpenAiArgumentGenerator};
pub use orchestrator::{DebateOrchestrator, DebateOutcome, DebateRequest};
pub use transcript::{
    Argument, Role, Rounds, Transcript, TranscriptError, Turn, DEFAULT_ROUNDS, EXPORT_FILE_NAME,
    MAX_ROUNDS, MIN_ROUNDS,
};

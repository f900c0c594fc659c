//! # Session Feature
//!
//! Ephemeral per-browser state: topic, rounds, transcript and UI flags.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Epoch tracking so a topic change supersedes an in-flight run
//! - 1.0.0: Initial release with reset-on-topic-change

pub mod runner;
pub mod state;
pub mod store;

pub use runner::run_session_debate;
pub use state::{DebatePhase, SessionState, StartRejected, VoteRejected, DEFAULT_TOPIC};
pub use store::{spawn_session_sweeper, SessionId, SessionStore};

//! # Features
//!
//! - **debate**: transcript model, argument generation and orchestration
//! - **presentation**: chat bubbles, typewriter and vote widget
//! - **session**: per-browser state, store and run supervision

pub mod debate;
pub mod presentation;
pub mod session;

// Re-export commonly used items
pub use debate::{
    ArgumentGenerator, DebateEvent, DebateOrchestrator, DebateOutcome, DebateRequest,
    OpenAiArgumentGenerator, Role, Rounds, Transcript, Turn,
};
pub use presentation::{Typewriter, Vote};
pub use session::{run_session_debate, spawn_session_sweeper, SessionState, SessionStore};

// Core layer - shared types and configuration
pub mod core;

// Features layer - debate, presentation and sessions
pub mod features;

// Web layer - HTTP routes and event streaming
pub mod web;

pub use core::Config;

pub use features::{
    // Debate
    ArgumentGenerator, DebateOrchestrator, DebateOutcome, DebateRequest, OpenAiArgumentGenerator,
    // Presentation
    Typewriter, Vote,
    // Sessions
    SessionState, SessionStore,
};

pub use web::{build_router, serve, AppState};

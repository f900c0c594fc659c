//! # Web Layer
//!
//! axum router serving the debate page and its event stream.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Server-Sent Events for live turns
//! - 1.0.0: Initial router

pub mod server;

pub use server::{build_router, serve, session_from_headers, AppState, SESSION_COOKIE};

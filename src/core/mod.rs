//! # Core Module
//!
//! Configuration, error types and text helpers for the debate bot.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add typed generation errors
//! - 1.1.0: Add text module with preview truncation and HTML escaping
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;
pub mod text;

// Re-export commonly used items
pub use config::Config;
pub use error::GenerationError;
pub use text::{escape_html, log_preview, truncate_preview};

//! # Presentation Feature
//!
//! Chat bubbles, simulated streaming, vote widget and page layout.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Typewriter emits partial-text events instead of blocking renders
//! - 1.0.0: Initial release

pub mod render;
pub mod typewriter;
pub mod vote;

pub use render::{bubble_style, render_bubble, render_page, render_transcript, render_vote};
pub use typewriter::{reveal_frames, Typewriter};
pub use vote::Vote;

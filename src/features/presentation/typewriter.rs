//! # Typewriter
//!
//! Simulated streaming: reveals an argument word by word with a fixed delay.
//! The text is already complete when this runs; the delay is purely cosmetic.

use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use crate::features::debate::events::{DebateEvent, EventSender};
use crate::features::debate::transcript::Role;

#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    delay: Duration,
}

impl Typewriter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A typewriter that emits every frame without pausing
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Emit one `Partial` event per word, each carrying the cumulative text.
    ///
    /// Returns the fully revealed text. A closed receiver does not stop the
    /// reveal; the events are simply dropped.
    pub async fn play(&self, round: u8, role: Role, text: &str, events: &EventSender) -> String {
        let frames = reveal_frames(text);
        let mut receiver_gone = false;

        for frame in &frames {
            if !receiver_gone {
                let event = DebateEvent::Partial {
                    round,
                    role,
                    text: frame.clone(),
                };
                if events.send(event).await.is_err() {
                    debug!("Event receiver closed, continuing without rendering");
                    receiver_gone = true;
                }
            }
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        frames.last().cloned().unwrap_or_default()
    }
}

/// Cumulative word-by-word frames of `text`, whitespace collapsed to single spaces
pub fn reveal_frames(text: &str) -> Vec<String> {
    let mut frames = Vec::new();
    let mut revealed = String::new();

    for word in text.split_whitespace() {
        if !revealed.is_empty() {
            revealed.push(' ');
        }
        revealed.push_str(word);
        frames.push(revealed.clone());
    }

    frames
}

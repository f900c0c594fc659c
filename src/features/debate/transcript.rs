//! # Debate Transcript
//!
//! Roles, arguments and the append-only record of a debate.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fewest rounds a debate can run
pub const MIN_ROUNDS: u8 = 1;
/// Most rounds a debate can run
pub const MAX_ROUNDS: u8 = 5;
/// Rounds preselected on the page
pub const DEFAULT_ROUNDS: u8 = 2;

/// Name of the exported transcript file
pub const EXPORT_FILE_NAME: &str = "debate.txt";

/// The two sides of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Argues for the topic (PRO)
    Advocate,
    /// Argues against the topic (CON)
    Opponent,
}

impl Role {
    /// Label used in prompts and exports
    pub fn label(self) -> &'static str {
        match self {
            Role::Advocate => "PRO",
            Role::Opponent => "CON",
        }
    }

    /// The role that speaks after this one
    pub fn next(self) -> Role {
        match self {
            Role::Advocate => Role::Opponent,
            Role::Opponent => Role::Advocate,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of rounds in a debate, always within `MIN_ROUNDS..=MAX_ROUNDS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64")]
pub struct Rounds(u8);

impl Rounds {
    /// Clamp a requested round count into the supported range
    pub fn clamped(requested: i64) -> Self {
        Rounds(requested.clamp(MIN_ROUNDS as i64, MAX_ROUNDS as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<i64> for Rounds {
    fn from(requested: i64) -> Self {
        Rounds::clamped(requested)
    }
}

impl Default for Rounds {
    fn default() -> Self {
        Rounds(DEFAULT_ROUNDS)
    }
}

/// One generated argument. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument(String);

impl Argument {
    /// Wrap generated text, collapsing whitespace runs to single spaces
    pub fn new(text: impl AsRef<str>) -> Self {
        Argument(
            text.as_ref()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub round: u8,
    pub role: Role,
    pub argument: Argument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("expected a {expected} turn but got {got}")]
    OutOfOrder { expected: Role, got: Role },
}

/// Chronological record of turns, strictly alternating from the advocate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role expected for the next appended turn
    pub fn next_role(&self) -> Role {
        self.turns
            .last()
            .map(|t| t.role.next())
            .unwrap_or(Role::Advocate)
    }

    /// Round number the next appended turn belongs to
    pub fn next_round(&self) -> u8 {
        (self.turns.len() / 2 + 1) as u8
    }

    /// Append a turn, rejecting anything that breaks alternation
    pub fn push(&mut self, role: Role, argument: Argument) -> Result<&Turn, TranscriptError> {
        let expected = self.next_role();
        if role != expected {
            return Err(TranscriptError::OutOfOrder {
                expected,
                got: role,
            });
        }

        let round = self.next_round();
        self.turns.push(Turn {
            round,
            role,
            argument,
        });
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Drop a trailing half-finished round
    pub fn truncate_to_completed_rounds(&mut self) {
        let keep = self.completed_rounds() * 2;
        self.turns.truncate(keep);
    }

    pub fn completed_rounds(&self) -> usize {
        self.turns.len() / 2
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Plain-text export: `PRO: ...` / `CON: ...` separated by blank lines
    pub fn export_text(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role.label(), t.argument))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(text: &str) -> Argument {
        Argument::new(text)
    }

    #[test]
    fn test_rounds_clamped() {
        assert_eq!(Rounds::clamped(0).get(), 1);
        assert_eq!(Rounds::clamped(3).get(), 3);
        assert_eq!(Rounds::clamped(99).get(), 5);
        assert_eq!(Rounds::clamped(-4).get(), 1);
    }

    #[test]
    fn test_rounds_deserialize_clamped() {
        let rounds: Rounds = serde_json::from_str("200").unwrap();
        assert_eq!(rounds.get(), MAX_ROUNDS);
        let rounds: Rounds = serde_json::from_str("0").unwrap();
        assert_eq!(rounds.get(), MIN_ROUNDS);
        assert_eq!(serde_json::to_string(&Rounds::clamped(3)).unwrap(), "3");
        assert_eq!(Rounds::default().get(), 2);
    }

    #[test]
    fn test_argument_trimmed() {
        assert_eq!(arg("  Pineapple is great.\n").as_str(), "Pineapple is great.");
        assert!(arg("   ").is_empty());
    }

    #[test]
    fn test_push_alternates_and_numbers_rounds() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.next_role(), Role::Advocate);

        transcript.push(Role::Advocate, arg("a1")).unwrap();
        transcript.push(Role::Opponent, arg("o1")).unwrap();
        let turn = transcript.push(Role::Advocate, arg("a2")).unwrap();
        assert_eq!(turn.round, 2);

        let rounds: Vec<u8> = transcript.turns().iter().map(|t| t.round).collect();
        assert_eq!(rounds, vec![1, 1, 2]);
        assert_eq!(transcript.completed_rounds(), 1);
    }

    #[test]
    fn test_push_rejects_out_of_order() {
        let mut transcript = Transcript::new();
        let err = transcript.push(Role::Opponent, arg("too early")).unwrap_err();
        assert_eq!(
            err,
            TranscriptError::OutOfOrder {
                expected: Role::Advocate,
                got: Role::Opponent
            }
        );
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_truncate_drops_partial_round() {
        let mut transcript = Transcript::new();
        transcript.push(Role::Advocate, arg("a1")).unwrap();
        transcript.push(Role::Opponent, arg("o1")).unwrap();
        transcript.push(Role::Advocate, arg("a2")).unwrap();

        transcript.truncate_to_completed_rounds();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.next_role(), Role::Advocate);
    }

    #[test]
    fn test_export_format() {
        let mut transcript = Transcript::new();
        transcript.push(Role::Advocate, arg("Pizza needs sweetness.")).unwrap();
        transcript.push(Role::Opponent, arg("Fruit has no place there.")).unwrap();

        assert_eq!(
            transcript.export_text(),
            "PRO: Pizza needs sweetness.\n\nCON: Fruit has no place there."
        );
    }

    #[test]
    fn test_multi_paragraph_argument_exports_as_one_entry() {
        let mut transcript = Transcript::new();
        transcript
            .push(Role::Advocate, arg("Pineapple is great.\n\nTruly.\t Sweet."))
            .unwrap();
        transcript.push(Role::Opponent, arg("No.")).unwrap();

        let export = transcript.export_text();
        let blocks: Vec<&str> = export.split("\n\n").collect();
        assert_eq!(blocks.len(), transcript.len());
        assert_eq!(blocks[0], "PRO: Pineapple is great. Truly. Sweet.");
        assert_eq!(blocks[1], "CON: No.");
    }

    #[test]
    fn test_export_one_entry_per_turn_in_order() {
        let mut transcript = Transcript::new();
        for i in 0..3 {
            transcript.push(Role::Advocate, arg(&format!("pro {i}"))).unwrap();
            transcript.push(Role::Opponent, arg(&format!("con {i}"))).unwrap();
        }

        let exported = transcript.export_text();
        let entries: Vec<&str> = exported.split("\n\n").collect();
        assert_eq!(entries.len(), transcript.len());
        assert_eq!(entries[0], "PRO: pro 0");
        assert_eq!(entries[5], "CON: con 2");
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(Transcript::new().export_text(), "");
    }
}

//! # Vote Widget
//!
//! Cosmetic "who won" poll. The choice only drives an acknowledgment message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Pro,
    Con,
}

impl Vote {
    pub const ALL: [Vote; 2] = [Vote::Pro, Vote::Con];

    /// Form value submitted by the radio buttons
    pub fn value(self) -> &'static str {
        match self {
            Vote::Pro => "pro",
            Vote::Con => "con",
        }
    }

    /// Option label shown next to the radio button
    pub fn label(self) -> &'static str {
        match self {
            Vote::Pro => "🟢 PRO",
            Vote::Con => "🔴 CON",
        }
    }

    pub fn parse(value: &str) -> Option<Vote> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pro" => Some(Vote::Pro),
            "con" => Some(Vote::Con),
            _ => None,
        }
    }

    pub fn acknowledgment(self) -> String {
        format!("🎉 You voted: {}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Vote::parse("pro"), Some(Vote::Pro));
        assert_eq!(Vote::parse(" CON "), Some(Vote::Con));
        assert_eq!(Vote::parse("draw"), None);
    }

    #[test]
    fn test_acknowledgment() {
        assert_eq!(Vote::Con.acknowledgment(), "🎉 You voted: 🔴 CON");
    }

    #[test]
    fn test_values_round_trip_through_parse() {
        for vote in Vote::ALL {
            assert_eq!(Vote::parse(vote.value()), Some(vote));
        }
    }
}

//! Closed-set difficulty classification. No free-form strings survive past
//! `Difficulty::parse` into the rest of the core.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Priority rank used by the scheduler's ordering tuple (§4.5).
    pub fn priority_rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Normalizes the legacy ingestion vocabulary ("Kolay"/"Orta"/"Zor",
    /// English synonyms, and the "very_hard" legacy alias) into the closed
    /// enumeration. Case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "easy" | "kolay" => Some(Difficulty::Easy),
            "normal" | "orta" => Some(Difficulty::Normal),
            "hard" | "zor" | "very_hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_synonyms() {
        assert_eq!(Difficulty::parse("Kolay"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("ORTA"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::parse("very_hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("zor"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("unknown"), None);
    }

    #[test]
    fn priority_rank_orders_hard_above_easy() {
        assert!(Difficulty::Hard.priority_rank() > Difficulty::Normal.priority_rank());
        assert!(Difficulty::Normal.priority_rank() > Difficulty::Easy.priority_rank());
    }
}

//! Monster reaction rolls.
//!
//! 2d6 plus a modifier (usually the speaker's CHA adjustment), read against
//! five bands from hostile to enthusiastic.

use ose_core::RandomSource;
use serde::{Deserialize, Serialize};

use crate::dice::roll::sum_with_modifier;
use crate::dice::roll_2d6;

/// How a monster or NPC reacts on first meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Attacks.
    Hostile,
    /// Aggressive, may attack.
    Unfriendly,
    /// Uncertain, confused.
    Uncertain,
    /// Indifferent, may negotiate.
    Positive,
    /// Eager, friendly.
    Enthusiastic,
}

impl Reaction {
    /// Band for a modified 2d6 total.
    pub fn from_total(total: i64) -> Self {
        match total {
            ..=2 => Self::Hostile,
            3..=5 => Self::Unfriendly,
            6..=8 => Self::Uncertain,
            9..=11 => Self::Positive,
            _ => Self::Enthusiastic,
        }
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hostile => write!(f, "hostile"),
            Self::Unfriendly => write!(f, "unfriendly"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::Positive => write!(f, "positive"),
            Self::Enthusiastic => write!(f, "enthusiastic"),
        }
    }
}

/// Result of a reaction roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRoll {
    /// The two d6 values.
    pub rolls: Vec<u32>,
    /// Modifier applied.
    pub modifier: i32,
    /// Modified total.
    pub total: i64,
    /// The reaction band.
    pub result: Reaction,
}

/// Roll 2d6 + `modifier` on the reaction table.
pub fn roll_reaction<R>(modifier: i32, rng: &mut R) -> ReactionRoll
where
    R: RandomSource + ?Sized,
{
    let rolls = roll_2d6(rng);
    let total = sum_with_modifier(&rolls, modifier);
    ReactionRoll {
        rolls,
        modifier,
        total,
        result: Reaction::from_total(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ose_core::ScriptedRolls;

    #[test]
    fn band_edges() {
        assert_eq!(Reaction::from_total(-3), Reaction::Hostile);
        assert_eq!(Reaction::from_total(2), Reaction::Hostile);
        assert_eq!(Reaction::from_total(3), Reaction::Unfriendly);
        assert_eq!(Reaction::from_total(5), Reaction::Unfriendly);
        assert_eq!(Reaction::from_total(6), Reaction::Uncertain);
        assert_eq!(Reaction::from_total(8), Reaction::Uncertain);
        assert_eq!(Reaction::from_total(9), Reaction::Positive);
        assert_eq!(Reaction::from_total(11), Reaction::Positive);
        assert_eq!(Reaction::from_total(12), Reaction::Enthusiastic);
        assert_eq!(Reaction::from_total(15), Reaction::Enthusiastic);
    }

    #[test]
    fn modifier_shifts_the_band() {
        let mut rolls = ScriptedRolls::new(&[4, 4]);
        let r = roll_reaction(1, &mut rolls);
        assert_eq!(r.rolls, vec![4, 4]);
        assert_eq!(r.total, 9);
        assert_eq!(r.result, Reaction::Positive);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_value(Reaction::Enthusiastic).unwrap();
        assert_eq!(json, "enthusiastic");
    }
}

//! Yes/no oracle.
//!
//! A likelihood sets the base chance of "Yes". A d100 is rolled and shifted
//! by the chaos factor; the answer is "Yes" when the shifted roll does not
//! exceed the base. The extreme fifth of either side of the unmodified roll
//! makes the answer exceptional ("Yes, and..." / "No, and..."). A double
//! (11, 22, ..., 99) at or under the chaos factor also attaches an event.

use std::str::FromStr;

use ose_core::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::event::{OracleEvent, generate_event};
use crate::chaos::ChaosFactor;
use crate::error::{SoloError, SoloResult};

/// How likely the asker thinks the answer is "Yes".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    /// 5% base.
    Impossible,
    /// 15% base.
    VeryUnlikely,
    /// 35% base.
    Unlikely,
    /// 50% base.
    #[default]
    Even,
    /// 65% base.
    Likely,
    /// 85% base.
    VeryLikely,
    /// 95% base.
    NearCertain,
}

impl Likelihood {
    /// Parse a likelihood from a user-supplied string.
    ///
    /// Case-insensitive; `-` and `_` count as spaces.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "impossible" => Some(Self::Impossible),
            "very unlikely" => Some(Self::VeryUnlikely),
            "unlikely" => Some(Self::Unlikely),
            "even" | "50/50" | "5050" | "fifty fifty" => Some(Self::Even),
            "likely" => Some(Self::Likely),
            "very likely" => Some(Self::VeryLikely),
            "near certain" | "certain" => Some(Self::NearCertain),
            _ => None,
        }
    }

    /// All likelihood values in order from least to most likely.
    pub fn all() -> &'static [Self] {
        &[
            Self::Impossible,
            Self::VeryUnlikely,
            Self::Unlikely,
            Self::Even,
            Self::Likely,
            Self::VeryLikely,
            Self::NearCertain,
        ]
    }

    /// Base chance of "Yes", out of 100.
    pub fn base_chance(self) -> u32 {
        match self {
            Self::Impossible => 5,
            Self::VeryUnlikely => 15,
            Self::Unlikely => 35,
            Self::Even => 50,
            Self::Likely => 65,
            Self::VeryLikely => 85,
            Self::NearCertain => 95,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Impossible => "impossible",
            Self::VeryUnlikely => "very unlikely",
            Self::Unlikely => "unlikely",
            Self::Even => "even",
            Self::Likely => "likely",
            Self::VeryLikely => "very likely",
            Self::NearCertain => "near certain",
        }
    }
}

impl std::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Likelihood {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SoloError::InvalidLikelihood(s.to_string()))
    }
}

/// The oracle's answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OracleAnswer {
    /// Yes, beyond what was expected.
    #[serde(rename = "Yes, and...")]
    ExceptionalYes,
    /// Affirmative.
    Yes,
    /// Negative.
    No,
    /// No, and worse than expected.
    #[serde(rename = "No, and...")]
    ExceptionalNo,
}

impl OracleAnswer {
    /// Whether this is a "Yes" of either strength.
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes | Self::ExceptionalYes)
    }

    /// Whether this is an exceptional answer.
    pub fn is_exceptional(self) -> bool {
        matches!(self, Self::ExceptionalYes | Self::ExceptionalNo)
    }
}

impl std::fmt::Display for OracleAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExceptionalYes => write!(f, "Yes, and..."),
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::ExceptionalNo => write!(f, "No, and..."),
        }
    }
}

/// The full result of an oracle consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleResult {
    /// The oracle's answer.
    pub answer: OracleAnswer,
    /// The unmodified d100 roll (1-100).
    pub roll: u32,
    /// The roll after the chaos modifier.
    pub modified: i32,
    /// The chaos factor in effect.
    pub chaos: ChaosFactor,
    /// The likelihood asked with.
    pub likelihood: Likelihood,
    /// Base chance of "Yes" for that likelihood.
    pub base: u32,
    /// An event, if the roll triggered one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub event: Option<OracleEvent>,
}

/// Whether the unmodified roll lands in the exceptional band for `base`.
pub fn is_exceptional(roll: u32, base: u32) -> bool {
    roll <= base / 5 || roll >= 100 - (100 - base) / 5
}

/// Whether a roll is a double whose digit does not exceed the chaos factor.
pub fn is_event_trigger(roll: u32, chaos: ChaosFactor) -> bool {
    if !(11..=99).contains(&roll) {
        return false;
    }
    let tens = roll / 10;
    let ones = roll % 10;
    tens == ones && tens <= chaos.value()
}

/// Ask the oracle a yes/no question.
pub fn ask<R>(likelihood: Likelihood, chaos: ChaosFactor, rng: &mut R) -> SoloResult<OracleResult>
where
    R: RandomSource + ?Sized,
{
    let base = likelihood.base_chance();
    let roll = rng.d100();
    // d100 is at most 100
    let modified = roll as i32 + chaos.roll_modifier();
    let yes = modified <= base as i32;

    let answer = match (yes, is_exceptional(roll, base)) {
        (true, true) => OracleAnswer::ExceptionalYes,
        (true, false) => OracleAnswer::Yes,
        (false, true) => OracleAnswer::ExceptionalNo,
        (false, false) => OracleAnswer::No,
    };

    let event = if is_event_trigger(roll, chaos) {
        Some(generate_event(rng)?)
    } else {
        None
    };

    debug!(
        %likelihood,
        %chaos,
        roll,
        modified,
        %answer,
        event = event.is_some(),
        "oracle consulted"
    );

    Ok(OracleResult {
        answer,
        roll,
        modified,
        chaos,
        likelihood,
        base,
        event,
    })
}

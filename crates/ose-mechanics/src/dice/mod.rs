//! Dice expressions and rolling.
//!
//! Expressions take the form `NdM`, `NdM+K` or `NdM-K`. The count defaults
//! to 1 when omitted (`d20`), and whitespace is allowed around the modifier.

pub mod roll;

pub use roll::DiceRoll;

use std::str::FromStr;

use ose_core::RandomSource;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Most dice a single expression may roll.
pub const MAX_COUNT: u32 = 100;
/// Most sides a die may have.
pub const MAX_SIDES: u32 = 1000;

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice (1..=100).
    pub count: u32,
    /// Sides per die (2..=1000).
    pub sides: u32,
    /// Flat modifier added to the sum.
    pub modifier: i32,
}

impl DiceExpr {
    /// Build an expression, checking the count and sides ranges.
    pub fn new(count: u32, sides: u32, modifier: i32) -> MechResult<Self> {
        let expr = Self {
            count,
            sides,
            modifier,
        };
        expr.check_ranges(&expr.to_string())?;
        Ok(expr)
    }

    /// Parse an expression such as `3d6+1`, `d20` or `2D8 - 2`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let text = input.trim().to_lowercase();
        let (count_part, rest) = text
            .split_once('d')
            .ok_or_else(|| MechError::invalid(input, "missing 'd'"))?;

        let count = if count_part.is_empty() {
            1
        } else {
            parse_digits(count_part).ok_or_else(|| MechError::invalid(input, "bad dice count"))?
        };

        let sides_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (sides_part, tail) = rest.split_at(sides_len);
        let sides =
            parse_digits(sides_part).ok_or_else(|| MechError::invalid(input, "bad die size"))?;

        let tail = tail.trim();
        let modifier = if tail.is_empty() {
            0
        } else {
            let (sign, amount) = if let Some(amount) = tail.strip_prefix('+') {
                (1, amount)
            } else if let Some(amount) = tail.strip_prefix('-') {
                (-1, amount)
            } else {
                return Err(MechError::invalid(input, "unexpected trailing text"));
            };
            let amount = parse_digits(amount.trim())
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| MechError::invalid(input, "bad modifier"))?;
            sign * amount
        };

        let expr = Self {
            count,
            sides,
            modifier,
        };
        expr.check_ranges(input)?;
        Ok(expr)
    }

    fn check_ranges(&self, input: &str) -> MechResult<()> {
        if !(1..=MAX_COUNT).contains(&self.count) {
            return Err(MechError::invalid(
                input,
                format!("dice count must be 1-{MAX_COUNT}"),
            ));
        }
        if !(2..=MAX_SIDES).contains(&self.sides) {
            return Err(MechError::invalid(
                input,
                format!("die size must be 2-{MAX_SIDES}"),
            ));
        }
        Ok(())
    }

    /// Roll the expression.
    pub fn roll<R>(&self, rng: &mut R) -> DiceRoll
    where
        R: RandomSource + ?Sized,
    {
        let rolls: Vec<u32> = (0..self.count).map(|_| rng.die(self.sides)).collect();
        DiceRoll::new(self.to_string(), rolls, self.modifier)
    }
}

/// Parse a run of ASCII digits; rejects signs and empty input.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Roll two six-sided dice.
pub fn roll_2d6<R>(rng: &mut R) -> Vec<u32>
where
    R: RandomSource + ?Sized,
{
    vec![rng.die(6), rng.die(6)]
}

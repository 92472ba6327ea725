//! Procedure checks: morale, loyalty, surprise, wandering monsters, and
//! encounter distance.

use ose_core::RandomSource;
use ose_core::random::choose;
use serde::{Deserialize, Serialize};

use crate::dice::roll::sum_with_modifier;
use crate::dice::roll_2d6;

/// A 2d6 roll-under check against a score (morale or loyalty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCheck {
    /// The two d6 values.
    pub rolls: Vec<u32>,
    /// Modifier applied.
    pub modifier: i32,
    /// Modified total.
    pub total: i64,
    /// The score rolled against.
    pub target: i32,
    /// Whether the total was at or under the score.
    pub pass: bool,
}

fn score_check<R>(target: i32, modifier: i32, rng: &mut R) -> ScoreCheck
where
    R: RandomSource + ?Sized,
{
    let rolls = roll_2d6(rng);
    let total = sum_with_modifier(&rolls, modifier);
    ScoreCheck {
        rolls,
        modifier,
        total,
        target,
        pass: total <= i64::from(target),
    }
}

/// Morale check: the monsters hold if 2d6 + `modifier` is at most `morale`.
pub fn morale_check<R>(morale: i32, modifier: i32, rng: &mut R) -> ScoreCheck
where
    R: RandomSource + ?Sized,
{
    score_check(morale, modifier, rng)
}

/// Hireling loyalty check: the hireling stays if 2d6 + `modifier` is at most
/// `loyalty`.
pub fn loyalty_check<R>(loyalty: i32, modifier: i32, rng: &mut R) -> ScoreCheck
where
    R: RandomSource + ?Sized,
{
    score_check(loyalty, modifier, rng)
}

/// An X-in-Y chance roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceCheck {
    /// Die size rolled.
    pub die: u32,
    /// The value rolled.
    pub roll: u32,
    /// Chance, out of `die`.
    pub chance: u32,
    /// Whether the roll was at or under the chance.
    pub hit: bool,
}

fn chance_check<R>(chance: u32, die: u32, rng: &mut R) -> ChanceCheck
where
    R: RandomSource + ?Sized,
{
    let chance = chance.max(1);
    let die = die.max(1);
    let roll = rng.die(die);
    ChanceCheck {
        die,
        roll,
        chance,
        hit: roll <= chance,
    }
}

/// Surprise check: surprised on a `chance`-in-`die` (usually 2-in-6).
pub fn surprise_check<R>(chance: u32, die: u32, rng: &mut R) -> ChanceCheck
where
    R: RandomSource + ?Sized,
{
    chance_check(chance, die, rng)
}

/// Wandering monster check: an encounter on `chance`-in-6, or in-8 when
/// `use_d8` is set.
pub fn wandering_check<R>(chance: u32, use_d8: bool, rng: &mut R) -> ChanceCheck
where
    R: RandomSource + ?Sized,
{
    chance_check(chance, if use_d8 { 8 } else { 6 }, rng)
}

/// Where an encounter takes place, for distance purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Underground; distances in feet.
    #[default]
    Dungeon,
    /// Outdoors; distances in yards.
    Wilderness,
}

impl Environment {
    /// `"dungeon"` (any case) or a blank string is a dungeon; anything else
    /// is outdoors.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("dungeon") {
            Self::Dungeon
        } else {
            Self::Wilderness
        }
    }

    /// The six possible distances.
    pub fn distances(self) -> &'static [u32] {
        match self {
            Self::Dungeon => &[10, 20, 30, 40, 50, 60],
            Self::Wilderness => &[30, 60, 90, 120, 180, 240],
        }
    }

    /// Unit the distances are measured in.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Dungeon => "ft",
            Self::Wilderness => "yd",
        }
    }
}

/// A rolled encounter distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDistance {
    /// Where the encounter happens.
    pub environment: Environment,
    /// Distance between the parties.
    pub distance: u32,
    /// `"ft"` or `"yd"`.
    pub unit: String,
}

/// Roll the distance at which an encounter begins.
pub fn encounter_distance<R>(environment: Environment, rng: &mut R) -> EncounterDistance
where
    R: RandomSource + ?Sized,
{
    let distance = choose(environment.distances(), rng).copied().unwrap_or(0);
    EncounterDistance {
        environment,
        distance,
        unit: environment.unit().to_string(),
    }
}

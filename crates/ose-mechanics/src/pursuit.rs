//! Pursuit and evasion.
//!
//! An abstract chase: every round both sides roll d6 plus a bonus from their
//! movement rate, and the evader's lead grows or shrinks by the difference.

use ose_core::RandomSource;
use serde::{Deserialize, Serialize};

/// Speed a side needs per point of bonus on its chase roll.
pub const SPEED_PER_POINT: u32 = 30;
/// Longest chase that will be rolled.
pub const MAX_ROUNDS: u32 = 100;

/// Settings for a chase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chase {
    /// Where the chase happens; blank means dungeon.
    pub terrain: String,
    /// Pursuer movement rate.
    pub pursuer_speed: u32,
    /// Evader movement rate.
    pub evader_speed: u32,
    /// Lead the evader starts with.
    pub headstart: i64,
    /// Rounds before the pursuers give up.
    pub rounds: u32,
}

impl Default for Chase {
    fn default() -> Self {
        Self {
            terrain: "dungeon".to_string(),
            pursuer_speed: 120,
            evader_speed: 120,
            headstart: 0,
            rounds: 6,
        }
    }
}

/// One round of a chase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseRound {
    /// Round number, from 1.
    pub round: u32,
    /// Pursuer's roll plus speed bonus.
    pub pursuer: i64,
    /// Evader's roll plus speed bonus.
    pub evader: i64,
    /// `evader - pursuer`.
    pub delta: i64,
    /// Lead after this round.
    pub lead: i64,
}

/// How a chase ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pursuit {
    /// Terrain, lowercased.
    pub terrain: String,
    /// Whether the pursuers closed the gap.
    pub caught: bool,
    /// Round the evaders were caught in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    /// Final lead.
    pub lead: i64,
    /// Every round rolled.
    pub history: Vec<ChaseRound>,
}

fn chase_roll<R>(speed: u32, rng: &mut R) -> i64
where
    R: RandomSource + ?Sized,
{
    i64::from(rng.die(6)) + i64::from(speed / SPEED_PER_POINT)
}

/// Run a chase. The pursuer rolls before the evader each round, and the
/// chase ends as soon as the lead drops to zero or below.
pub fn pursuit_evasion<R>(chase: &Chase, rng: &mut R) -> Pursuit
where
    R: RandomSource + ?Sized,
{
    let terrain = match chase.terrain.trim() {
        "" => "dungeon".to_string(),
        t => t.to_lowercase(),
    };
    let rounds = chase.rounds.clamp(1, MAX_ROUNDS);
    let mut lead = chase.headstart;
    let mut history = Vec::new();

    for round in 1..=rounds {
        let pursuer = chase_roll(chase.pursuer_speed, rng);
        let evader = chase_roll(chase.evader_speed, rng);
        let delta = evader - pursuer;
        lead = lead.saturating_add(delta);
        history.push(ChaseRound {
            round,
            pursuer,
            evader,
            delta,
            lead,
        });
        if lead <= 0 {
            return Pursuit {
                terrain,
                caught: true,
                round: Some(round),
                lead,
                history,
            };
        }
    }

    Pursuit {
        terrain,
        caught: false,
        round: None,
        lead,
        history,
    }
}

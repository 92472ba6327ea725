//! Oracle event prompts.
//!
//! An event is a focus (what the event is about) drawn from a weighted table,
//! plus a verb and a noun for the GM to interpret.

use ose_core::random::choose;
use ose_core::{RandomSource, Weighted, pick};
use serde::{Deserialize, Serialize};

use crate::error::SoloResult;

/// Verbs for event prompts.
pub const EVENT_VERBS: &[&str] = &[
    "Attack",
    "Defend",
    "Move",
    "Investigate",
    "Reveal",
    "Transform",
    "Delay",
    "Protect",
];

/// Nouns for event prompts.
pub const EVENT_NOUNS: &[&str] = &[
    "Enemy", "Friend", "Location", "Item", "Secret", "Faction", "Leader", "Danger",
];

/// What an oracle event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFocus {
    /// Something happens elsewhere that affects the party.
    RemoteEvent,
    /// An NPC takes independent action.
    NpcAction,
    /// A new NPC enters the story.
    IntroduceNpc,
    /// An active plot thread advances.
    MoveTowardThread,
    /// An active plot thread is set back.
    MoveAwayFromThread,
    /// An active plot thread resolves.
    CloseThread,
    /// Something bad happens to a player character.
    PcNegative,
    /// Something good happens to a player character.
    PcPositive,
    /// An ambiguous event that could go either way.
    AmbiguousEvent,
    /// Something bad happens to an NPC.
    NpcNegative,
    /// Something good happens to an NPC.
    NpcPositive,
}

impl EventFocus {
    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemoteEvent => "Remote Event",
            Self::NpcAction => "NPC Action",
            Self::IntroduceNpc => "Introduce NPC",
            Self::MoveTowardThread => "Move Toward Thread",
            Self::MoveAwayFromThread => "Move Away From Thread",
            Self::CloseThread => "Close Thread",
            Self::PcNegative => "PC Negative",
            Self::PcPositive => "PC Positive",
            Self::AmbiguousEvent => "Ambiguous Event",
            Self::NpcNegative => "NPC Negative",
            Self::NpcPositive => "NPC Positive",
        }
    }
}

impl std::fmt::Display for EventFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the event focus table.
#[derive(Debug, Clone, Copy)]
pub struct FocusRow {
    /// The focus this row yields.
    pub focus: EventFocus,
    /// Relative weight.
    pub weight: u32,
}

impl Weighted for FocusRow {
    fn label(&self) -> &str {
        self.focus.as_str()
    }

    fn weight(&self) -> u32 {
        self.weight
    }
}

const fn row(focus: EventFocus, weight: u32) -> FocusRow {
    FocusRow { focus, weight }
}

/// Event focus weights; they sum to 100.
pub const EVENT_FOCUS_TABLE: &[FocusRow] = &[
    row(EventFocus::RemoteEvent, 7),
    row(EventFocus::NpcAction, 21),
    row(EventFocus::IntroduceNpc, 7),
    row(EventFocus::MoveTowardThread, 10),
    row(EventFocus::MoveAwayFromThread, 7),
    row(EventFocus::CloseThread, 3),
    row(EventFocus::PcNegative, 12),
    row(EventFocus::PcPositive, 8),
    row(EventFocus::AmbiguousEvent, 8),
    row(EventFocus::NpcNegative, 9),
    row(EventFocus::NpcPositive, 8),
];

/// A generated event prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleEvent {
    /// What the event is about.
    pub focus: EventFocus,
    /// Action word.
    pub verb: String,
    /// Subject word.
    pub noun: String,
}

impl std::fmt::Display for OracleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} + {}", self.focus, self.verb, self.noun)
    }
}

/// Roll on the event focus table.
pub fn roll_event_focus<R>(rng: &mut R) -> SoloResult<EventFocus>
where
    R: RandomSource + ?Sized,
{
    Ok(pick(EVENT_FOCUS_TABLE, rng)?.focus)
}

/// Generate a complete event: focus, then verb, then noun.
pub fn generate_event<R>(rng: &mut R) -> SoloResult<OracleEvent>
where
    R: RandomSource + ?Sized,
{
    let focus = roll_event_focus(rng)?;
    let verb = choose(EVENT_VERBS, rng).copied().unwrap_or_default();
    let noun = choose(EVENT_NOUNS, rng).copied().unwrap_or_default();
    Ok(OracleEvent {
        focus,
        verb: verb.to_string(),
        noun: noun.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ose_core::ScriptedRolls;
    use ose_core::weighted::total_weight;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn focus_weights_sum_to_one_hundred() {
        assert_eq!(total_weight(EVENT_FOCUS_TABLE).unwrap(), 100);
    }

    #[test]
    fn focus_bands_match_d100_ranges() {
        let cases = [
            (1, EventFocus::RemoteEvent),
            (7, EventFocus::RemoteEvent),
            (8, EventFocus::NpcAction),
            (28, EventFocus::NpcAction),
            (29, EventFocus::IntroduceNpc),
            (55, EventFocus::CloseThread),
            (56, EventFocus::PcNegative),
            (83, EventFocus::AmbiguousEvent),
            (100, EventFocus::NpcPositive),
        ];
        for (roll, expected) in cases {
            let mut rolls = ScriptedRolls::new(&[roll]);
            assert_eq!(roll_event_focus(&mut rolls).unwrap(), expected, "roll {roll}");
        }
    }

    #[test]
    fn event_focus_covers_every_row() {
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..2000 {
            seen.insert(roll_event_focus(&mut rng).unwrap());
        }
        assert_eq!(seen.len(), 11, "missing focus types: {seen:?}");
    }

    #[test]
    fn scripted_event_uses_focus_verb_noun_order() {
        let mut rolls = ScriptedRolls::new(&[30, 4, 7]);
        let event = generate_event(&mut rolls).unwrap();
        assert_eq!(event.focus, EventFocus::IntroduceNpc);
        assert_eq!(event.verb, "Reveal");
        assert_eq!(event.noun, "Danger");
        assert_eq!(event.to_string(), "Introduce NPC: Reveal + Danger");
    }

    #[test]
    fn words_come_from_the_lists() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let event = generate_event(&mut rng).unwrap();
            assert!(EVENT_VERBS.contains(&event.verb.as_str()));
            assert!(EVENT_NOUNS.contains(&event.noun.as_str()));
        }
    }

    #[test]
    fn focus_serializes_snake_case() {
        let json = serde_json::to_string(&EventFocus::MoveAwayFromThread).unwrap();
        assert_eq!(json, "\"move_away_from_thread\"");
    }
}

//! Quick dungeon room and wilderness hex prompts.

use ose_core::random::choose;
use ose_core::{RandomSource, pick_label};
use serde::{Deserialize, Serialize};

use crate::error::SoloResult;

/// What a dungeon room holds.
pub const ROOM_CONTENTS: &[(&str, u32)] = &[
    ("empty", 40),
    ("monster", 30),
    ("trap", 15),
    ("special", 10),
    ("treasure", 5),
];

/// Rough room size and shape.
pub const ROOM_SIZE: &[(&str, u32)] = &[
    ("small chamber", 35),
    ("large chamber", 25),
    ("hallway", 20),
    ("odd shape", 10),
    ("huge area", 10),
];

/// Number of exits.
pub const ROOM_EXITS: &[(&str, u32)] = &[
    ("no obvious exits", 10),
    ("1 exit", 35),
    ("2 exits", 30),
    ("3 exits", 15),
    ("4+ exits", 10),
];

/// Sensory details, picked uniformly.
pub const ROOM_DETAILS: &[&str] = &[
    "damp stone and mildew",
    "fresh drafts and distant echoes",
    "dusty, undisturbed floor",
    "recent scuff marks",
    "faint sulfur smell",
    "sticky cobwebs everywhere",
];

/// Notable wilderness hex features.
pub const HEX_FEATURES: &[(&str, u32)] = &[
    ("ruin", 15),
    ("lair", 10),
    ("village/hamlet", 10),
    ("strange landmark", 15),
    ("hazard", 15),
    ("resource", 10),
    ("nothing notable", 25),
];

/// Twists on a hex feature, picked uniformly.
pub const HEX_TWISTS: &[&str] = &[
    "it's older than it looks",
    "it's currently occupied",
    "it's a decoy / red herring",
    "it has a hidden entrance",
    "it's cursed or taboo",
    "it's being fought over",
];

/// A generated dungeon room prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPrompt {
    /// Size and shape.
    pub size: String,
    /// Exits.
    pub exits: String,
    /// Contents category.
    pub contents: String,
    /// Sensory detail.
    pub detail: String,
}

/// A generated wilderness hex prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexPrompt {
    /// The hex's notable feature.
    pub feature: String,
    /// A twist on it.
    pub twist: String,
}

/// Roll a dungeon room: size, exits, contents, then detail.
pub fn dungeon_room<R>(rng: &mut R) -> SoloResult<RoomPrompt>
where
    R: RandomSource + ?Sized,
{
    let size = pick_label(ROOM_SIZE, rng)?;
    let exits = pick_label(ROOM_EXITS, rng)?;
    let contents = pick_label(ROOM_CONTENTS, rng)?;
    let detail = choose(ROOM_DETAILS, rng).copied().unwrap_or_default();
    Ok(RoomPrompt {
        size: size.to_string(),
        exits: exits.to_string(),
        contents: contents.to_string(),
        detail: detail.to_string(),
    })
}

/// Roll a wilderness hex: feature, then twist.
pub fn hex_feature<R>(rng: &mut R) -> SoloResult<HexPrompt>
where
    R: RandomSource + ?Sized,
{
    let feature = pick_label(HEX_FEATURES, rng)?;
    let twist = choose(HEX_TWISTS, rng).copied().unwrap_or_default();
    Ok(HexPrompt {
        feature: feature.to_string(),
        twist: twist.to_string(),
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
    fn tables_total_one_hundred() {
        for table in [ROOM_CONTENTS, ROOM_SIZE, ROOM_EXITS, HEX_FEATURES] {
            assert_eq!(total_weight(table).unwrap(), 100);
        }
    }

    #[test]
    fn scripted_room() {
        // 36 falls past small chamber, 71 past monster
        let mut rolls = ScriptedRolls::new(&[36, 10, 71, 5]);
        let room = dungeon_room(&mut rolls).unwrap();
        assert_eq!(room.size, "large chamber");
        assert_eq!(room.exits, "no obvious exits");
        assert_eq!(room.contents, "trap");
        assert_eq!(room.detail, "sticky cobwebs everywhere");
    }

    #[test]
    fn scripted_hex() {
        let mut rolls = ScriptedRolls::new(&[100, 0]);
        let hex = hex_feature(&mut rolls).unwrap();
        assert_eq!(hex.feature, "nothing notable");
        assert_eq!(hex.twist, "it's older than it looks");
    }

    #[test]
    fn rooms_draw_from_the_tables() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let room = dungeon_room(&mut rng).unwrap();
            assert!(ROOM_SIZE.iter().any(|(l, _)| *l == room.size));
            assert!(ROOM_EXITS.iter().any(|(l, _)| *l == room.exits));
            assert!(ROOM_CONTENTS.iter().any(|(l, _)| *l == room.contents));
            assert!(ROOM_DETAILS.contains(&room.detail.as_str()));
        }
    }

    #[test]
    fn same_seed_same_hex() {
        let a = hex_feature(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = hex_feature(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }
}

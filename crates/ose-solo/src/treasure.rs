//! Tunable treasure roller.
//!
//! Not rules-text exact: coin amounts scale with hit dice and dungeon level,
//! and each extra category has a percentile chance that grows with depth.

use std::str::FromStr;

use ose_core::{RandomSource, Weighted, pick, pick_label};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SoloError, SoloResult};

/// Which treasure procedure to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasureKind {
    /// Carried by individual monsters.
    #[default]
    Individual,
    /// A lair's hoard.
    Hoard,
}

impl TreasureKind {
    /// Parse a kind, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Some(Self::Individual),
            "hoard" => Some(Self::Hoard),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Hoard => "hoard",
        }
    }
}

impl std::fmt::Display for TreasureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreasureKind {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SoloError::InvalidTreasureKind(s.to_string()))
    }
}

/// A gem value band.
#[derive(Debug, Clone, Copy)]
pub struct GemValue {
    /// Display label.
    pub label: &'static str,
    /// Worth in gold pieces.
    pub value_gp: u32,
    /// Relative weight.
    pub weight: u32,
}

impl Weighted for GemValue {
    fn label(&self) -> &str {
        self.label
    }

    fn weight(&self) -> u32 {
        self.weight
    }
}

/// Gem values, weighted toward the middle.
pub const GEM_VALUES: &[GemValue] = &[
    GemValue {
        label: "10 gp",
        value_gp: 10,
        weight: 4,
    },
    GemValue {
        label: "50 gp",
        value_gp: 50,
        weight: 5,
    },
    GemValue {
        label: "100 gp",
        value_gp: 100,
        weight: 6,
    },
    GemValue {
        label: "500 gp",
        value_gp: 500,
        weight: 4,
    },
    GemValue {
        label: "1000 gp",
        value_gp: 1000,
        weight: 1,
    },
];

/// Magic item categories.
pub const MAGIC_ITEM_TYPES: &[(&str, u32)] = &[
    ("armour or shield", 10),
    ("miscellaneous item", 5),
    ("potion", 25),
    ("ring", 5),
    ("rod, staff, or wand", 5),
    ("scroll or map", 20),
    ("sword", 20),
    ("weapon", 10),
];

/// A rolled treasure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    /// Procedure used.
    pub kind: TreasureKind,
    /// Hit dice after clamping.
    pub hd: u32,
    /// Dungeon level after clamping.
    pub dungeon_level: u32,
    /// Coins, in gold pieces.
    pub coins_gp: u64,
    /// One value per gem.
    pub gems: Vec<u32>,
    /// One value per piece of jewelry.
    pub jewelry: Vec<u32>,
    /// One category per magic item.
    pub magic_items: Vec<String>,
    /// Coins plus gem and jewelry values.
    pub total_value_gp: u64,
}

/// Deepest dungeon level the roller scales with; deeper levels roll as this.
pub const MAX_DUNGEON_LEVEL: u32 = 100;

/// Roll treasure. `hd` is clamped to at least 1 and `dungeon_level` to
/// `1..=MAX_DUNGEON_LEVEL`.
pub fn roll_treasure<R>(
    kind: TreasureKind,
    hd: u32,
    dungeon_level: u32,
    rng: &mut R,
) -> SoloResult<Treasure>
where
    R: RandomSource + ?Sized,
{
    let hd = hd.max(1);
    let dl = dungeon_level.clamp(1, MAX_DUNGEON_LEVEL);

    let (coins_gp, gem_count, jewelry_count, magic_count) = match kind {
        TreasureKind::Individual => {
            let coins = rng.roll_range(0, 50).saturating_mul(u64::from(hd));
            let gems = u64::from(rng.d100() <= dl.saturating_add(5));
            let magic = u64::from(rng.d100() <= dl.saturating_sub(1).max(1));
            (coins, gems, 0, magic)
        }
        TreasureKind::Hoard => {
            let coins = rng
                .roll_range(50, 300)
                .saturating_mul(u64::from(hd))
                .saturating_mul(u64::from(dl));
            let gems = if rng.d100() <= dl.saturating_mul(2).saturating_add(25) {
                rng.roll_range(0, 3)
            } else {
                0
            };
            let jewelry = if rng.d100() <= dl.saturating_add(15) {
                rng.roll_range(0, 2)
            } else {
                0
            };
            let magic = u64::from(rng.d100() <= dl.saturating_mul(2).saturating_add(10));
            (coins, gems, jewelry, magic)
        }
    };

    let mut gems = Vec::new();
    for _ in 0..gem_count {
        gems.push(pick(GEM_VALUES, rng)?.value_gp);
    }
    let mut jewelry = Vec::new();
    for _ in 0..jewelry_count {
        let dice = rng.die(6) + rng.die(6) + rng.die(6);
        jewelry.push(dice.saturating_mul(100));
    }
    let mut magic_items = Vec::new();
    for _ in 0..magic_count {
        magic_items.push(pick_label(MAGIC_ITEM_TYPES, rng)?.to_string());
    }

    let total_value_gp = gems
        .iter()
        .chain(&jewelry)
        .fold(coins_gp, |acc, v| acc.saturating_add(u64::from(*v)));

    debug!(%kind, hd, dl, coins_gp, total_value_gp, "treasure rolled");

    Ok(Treasure {
        kind,
        hd,
        dungeon_level: dl,
        coins_gp,
        gems,
        jewelry,
        magic_items,
        total_value_gp,
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
    fn kind_parsing() {
        assert_eq!("Hoard".parse::<TreasureKind>().unwrap(), TreasureKind::Hoard);
        assert_eq!(" individual ".parse::<TreasureKind>().unwrap(), TreasureKind::Individual);
        assert!(matches!(
            "pile".parse::<TreasureKind>(),
            Err(SoloError::InvalidTreasureKind(_))
        ));
    }

    #[test]
    fn magic_table_totals_one_hundred() {
        assert_eq!(total_weight(MAGIC_ITEM_TYPES).unwrap(), 100);
        assert_eq!(total_weight(GEM_VALUES).unwrap(), 20);
    }

    #[test]
    fn individual_with_scripted_rolls() {
        // coins 20 x hd 3, gem check 6 <= 5+1, magic check 2 > 1, gem value 12 -> 100 gp
        let mut rolls = ScriptedRolls::new(&[20, 6, 2, 12]);
        let t = roll_treasure(TreasureKind::Individual, 3, 1, &mut rolls).unwrap();
        assert_eq!(t.coins_gp, 60);
        assert_eq!(t.gems, vec![100]);
        assert!(t.jewelry.is_empty());
        assert!(t.magic_items.is_empty());
        assert_eq!(t.total_value_gp, 160);
    }

    #[test]
    fn hoard_draw_order_is_coins_checks_then_values() {
        let mut rolls = ScriptedRolls::new(&[
            100, // coins
            1, 2, // gem check, gem count
            1, 1, // jewelry check, jewelry count
            1,  // magic check
            1, 20, // gem values
            6, 6, 6, // jewelry dice
            100, // magic type
        ]);
        let t = roll_treasure(TreasureKind::Hoard, 2, 2, &mut rolls).unwrap();
        assert_eq!(t.coins_gp, 400);
        assert_eq!(t.gems, vec![10, 1000]);
        assert_eq!(t.jewelry, vec![1800]);
        assert_eq!(t.magic_items, vec!["weapon".to_string()]);
        assert_eq!(t.total_value_gp, 400 + 10 + 1000 + 1800);
        assert_eq!(rolls.drawn(), 12);
    }

    #[test]
    fn inputs_are_clamped() {
        let mut rng = StdRng::seed_from_u64(5);
        let t = roll_treasure(TreasureKind::Hoard, 0, 0, &mut rng).unwrap();
        assert_eq!(t.hd, 1);
        assert_eq!(t.dungeon_level, 1);
        assert!((50..=300).contains(&t.coins_gp));
    }

    #[test]
    fn huge_levels_roll_as_the_deepest_level() {
        let mut rng = StdRng::seed_from_u64(13);
        for kind in [TreasureKind::Individual, TreasureKind::Hoard] {
            let t = roll_treasure(kind, u32::MAX, u32::MAX, &mut rng).unwrap();
            assert_eq!(t.dungeon_level, MAX_DUNGEON_LEVEL);
            assert_eq!(t.hd, u32::MAX);
        }

        // gem check 100 <= 105 always passes at the deepest level
        let mut rolls = ScriptedRolls::new(&[0, 100, 1, 1, 1]);
        let t = roll_treasure(TreasureKind::Individual, 1, u32::MAX, &mut rolls).unwrap();
        assert_eq!(t.gems.len(), 1);
        assert_eq!(t.magic_items.len(), 1);
    }

    #[test]
    fn individual_never_has_jewelry() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let t = roll_treasure(TreasureKind::Individual, 2, 4, &mut rng).unwrap();
            assert!(t.jewelry.is_empty());
            assert!(t.gems.len() <= 1);
            assert!(t.magic_items.len() <= 1);
            assert!(t.coins_gp <= 100);
        }
    }

    #[test]
    fn serializes_kind_lowercase() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = roll_treasure(TreasureKind::Hoard, 1, 1, &mut rng).unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["kind"], "hoard");
        assert!(json["coins_gp"].is_u64());
    }
}

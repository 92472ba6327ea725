//! Chaos factor tracking for the oracle.
//!
//! The chaos factor (1-9) represents how unpredictable the campaign has
//! become. It shifts the oracle's d100 roll by five points per step away
//! from 5.

use serde::{Deserialize, Serialize};

/// The chaos factor, ranging from 1 (orderly) to 9 (chaotic).
///
/// Starts at 5 by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ChaosFactor {
    value: u32,
}

impl ChaosFactor {
    /// Lowest chaos value.
    pub const MIN: u32 = 1;
    /// Highest chaos value.
    pub const MAX: u32 = 9;

    /// Create a new chaos factor, clamped to 1-9.
    pub fn new(value: u32) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
        }
    }

    /// Get the current chaos value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Increase chaos by 1 (max 9).
    pub fn increase(&mut self) {
        self.value = (self.value + 1).min(Self::MAX);
    }

    /// Decrease chaos by 1 (min 1).
    pub fn decrease(&mut self) {
        self.value = self.value.saturating_sub(1).max(Self::MIN);
    }

    /// Modifier added to an oracle d100 roll: `(chaos - 5) * 5`, so -20..=20.
    pub fn roll_modifier(&self) -> i32 {
        (self.value as i32 - 5) * 5
    }
}

impl Default for ChaosFactor {
    fn default() -> Self {
        Self::new(5)
    }
}

impl From<u32> for ChaosFactor {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<ChaosFactor> for u32 {
    fn from(chaos: ChaosFactor) -> Self {
        chaos.value
    }
}

impl std::fmt::Display for ChaosFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

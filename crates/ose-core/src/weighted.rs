//! Weighted random-table selection.
//!
//! [`pick`] is the one selection algorithm shared by encounter tables,
//! treasure, oracle event focus, and room/hex stocking. Weights are positive
//! integers; a zero weight is rejected rather than silently bumped to 1.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;

/// Anything that can sit in a weighted table.
pub trait Weighted {
    /// Label reported in results and error messages.
    fn label(&self) -> &str;

    /// Relative weight; must be at least 1.
    fn weight(&self) -> u32;
}

/// A labelled, weighted table row with an opaque JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry {
    /// Display label, e.g. `"Goblins (2d6)"`.
    pub label: String,
    /// Relative weight (>= 1).
    pub weight: u32,
    /// Free-form data: hit dice, group size, notes, references.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl WeightedEntry {
    /// Create an entry with an empty payload. Fails on weight 0.
    pub fn new(label: impl Into<String>, weight: u32) -> CoreResult<Self> {
        Self::with_payload(label, weight, Map::new())
    }

    /// Create an entry carrying `payload`. Fails on weight 0 or a blank label.
    pub fn with_payload(
        label: impl Into<String>,
        weight: u32,
        payload: Map<String, Value>,
    ) -> CoreResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "entry label must not be empty".to_string(),
            ));
        }
        if weight == 0 {
            return Err(CoreError::InvalidArgument(format!(
                "entry \"{label}\" has weight 0; weights must be at least 1"
            )));
        }
        Ok(Self {
            label,
            weight,
            payload,
        })
    }
}

impl Weighted for WeightedEntry {
    fn label(&self) -> &str {
        &self.label
    }

    fn weight(&self) -> u32 {
        self.weight
    }
}

/// Static tables are written as `(label, weight)` pairs.
impl Weighted for (&str, u32) {
    fn label(&self) -> &str {
        self.0
    }

    fn weight(&self) -> u32 {
        self.1
    }
}

/// Sum of all weights, rejecting empty tables and zero weights.
pub fn total_weight<T: Weighted>(entries: &[T]) -> CoreResult<u64> {
    if entries.is_empty() {
        return Err(CoreError::InvalidArgument(
            "no entries to pick from".to_string(),
        ));
    }
    let mut total: u64 = 0;
    for entry in entries {
        if entry.weight() == 0 {
            return Err(CoreError::InvalidArgument(format!(
                "entry \"{}\" has weight 0; weights must be at least 1",
                entry.label()
            )));
        }
        total += u64::from(entry.weight());
    }
    Ok(total)
}

/// Pick one entry with probability proportional to its weight.
///
/// Draws `r` in `1..=total` and returns the first entry whose running weight
/// sum reaches `r`. Entry order only matters for reproducibility under a
/// fixed seed.
pub fn pick<'a, T, R>(entries: &'a [T], rng: &mut R) -> CoreResult<&'a T>
where
    T: Weighted,
    R: RandomSource + ?Sized,
{
    let total = total_weight(entries)?;
    let roll = rng.roll_range(1, total);

    let mut acc: u64 = 0;
    for entry in entries {
        acc += u64::from(entry.weight());
        if roll <= acc {
            return Ok(entry);
        }
    }

    // Unreachable while `total` matches the walk above.
    entries
        .last()
        .ok_or_else(|| CoreError::InvalidArgument("no entries to pick from".to_string()))
}

/// Pick from a static `(label, weight)` table and return the label.
pub fn pick_label<'a, R>(table: &[(&'a str, u32)], rng: &mut R) -> CoreResult<&'a str>
where
    R: RandomSource + ?Sized,
{
    pick(table, rng).map(|(label, _)| *label)
}

//! Injectable randomness.
//!
//! Every generator in the workspace draws through [`RandomSource`] instead of
//! a process-global RNG. Any [`rand::Rng`] is a random source, so callers
//! normally pass a seeded `StdRng`; tests that need exact outputs can pass
//! [`ScriptedRolls`] instead.

use rand::Rng;

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Draw an integer uniformly from `low..=high`. `low` must not exceed `high`.
    fn roll_range(&mut self, low: u64, high: u64) -> u64;

    /// Roll a single die with `sides` faces (1..=sides). A die with fewer
    /// than one side is treated as a d1.
    fn die(&mut self, sides: u32) -> u32 {
        let sides = u64::from(sides.max(1));
        // value is at most `sides`, which came from a u32
        self.roll_range(1, sides) as u32
    }

    /// Roll a percentile die (1..=100).
    fn d100(&mut self) -> u32 {
        self.die(100)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll_range(&mut self, low: u64, high: u64) -> u64 {
        self.random_range(low..=high)
    }
}

/// Pick one item uniformly, or `None` if `items` is empty.
pub fn choose<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let last = (items.len() - 1) as u64;
    let idx = rng.roll_range(0, last) as usize;
    items.get(idx)
}

/// A random source that replays a fixed script of values.
///
/// Values cycle when the script runs out and are clamped into the requested
/// range, so a scripted `7` drawn from `1..=10` yields exactly 7.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    values: Vec<u64>,
    next: usize,
}

impl ScriptedRolls {
    /// Create a source that replays `values` in order.
    pub fn new(values: &[u64]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_range(&mut self, low: u64, high: u64) -> u64 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(low, high)
    }
}

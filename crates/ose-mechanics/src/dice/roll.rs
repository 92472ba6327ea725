//! Dice roll results.

use serde::{Deserialize, Serialize};

/// The result of rolling a dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The expression in canonical form.
    pub expr: String,
    /// Individual die values, in roll order.
    pub rolls: Vec<u32>,
    /// Flat modifier.
    pub modifier: i32,
    /// Sum of the dice plus the modifier.
    pub total: i64,
}

impl DiceRoll {
    /// Build a result, computing the total.
    pub fn new(expr: String, rolls: Vec<u32>, modifier: i32) -> Self {
        let total = sum_with_modifier(&rolls, modifier);
        Self {
            expr,
            rolls,
            modifier,
            total,
        }
    }
}

/// Sum die values and add a modifier.
pub fn sum_with_modifier(rolls: &[u32], modifier: i32) -> i64 {
    rolls.iter().map(|r| i64::from(*r)).sum::<i64>() + i64::from(modifier)
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(|v| v.to_string()).collect();
        write!(f, "{}: [{}] = {}", self.expr, values.join(", "), self.total)
    }
}

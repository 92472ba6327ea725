//! Dice expressions and procedure checks for the OSE campaign tools.
//!
//! Covers `NdM+K` dice rolling, monster reactions, morale and loyalty checks,
//! surprise and wandering monster checks, encounter distance, chases, and
//! weather.

pub mod checks;
pub mod dice;
pub mod error;
pub mod pursuit;
pub mod reaction;
pub mod weather;

pub use checks::{ChanceCheck, EncounterDistance, Environment, ScoreCheck};
pub use dice::{DiceExpr, DiceRoll};
pub use error::{MechError, MechResult};
pub use pursuit::{Chase, ChaseRound, Pursuit, pursuit_evasion};
pub use reaction::{Reaction, ReactionRoll, roll_reaction};
pub use weather::{WeatherRoll, weather_roll};

//! Solo GM generators for the OSE campaign tools.
//!
//! Provides a yes/no oracle driven by likelihood and a chaos factor, event
//! prompts, dungeon room and wilderness hex stocking, and a treasure roller.
//! Every generator draws through an injected [`ose_core::RandomSource`].

pub mod chaos;
pub mod error;
pub mod oracle;
pub mod stocking;
pub mod treasure;

pub use chaos::ChaosFactor;
pub use error::{SoloError, SoloResult};
pub use oracle::{EventFocus, Likelihood, OracleAnswer, OracleEvent, OracleResult};
pub use stocking::{HexPrompt, RoomPrompt};
pub use treasure::{Treasure, TreasureKind};

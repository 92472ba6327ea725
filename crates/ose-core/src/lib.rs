//! Core of the OSE campaign tools: weighted tables and encounter resolution.
//!
//! [`weighted::pick`] draws from any weighted table. [`resolver`] finds the
//! best stored encounter table for a query by relaxing scope instance and
//! biome in a fixed order, then picks one of its entries. Randomness is always
//! injected through [`RandomSource`].

/// Encounter table and entry records.
pub mod encounter;
/// Error types used throughout the crate.
pub mod error;
/// In-memory implementation of [`EncounterStore`].
pub mod memory;
/// Injectable random sources.
pub mod random;
/// Encounter table resolution cascade.
pub mod resolver;
/// Weighted random-table selection.
pub mod weighted;

/// Re-export encounter record types.
pub use encounter::{EncounterEntry, EncounterTable, NewEncounterTable, Scope, normalize_biome};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the in-memory store.
pub use memory::MemoryStore;
/// Re-export random source types.
pub use random::{RandomSource, ScriptedRolls};
/// Re-export resolver types.
pub use resolver::{
    CascadeStep, EncounterQuery, EncounterRoll, EncounterStore, resolve_encounter, resolve_table,
};
/// Re-export weighted table types.
pub use weighted::{Weighted, WeightedEntry, pick, pick_label};

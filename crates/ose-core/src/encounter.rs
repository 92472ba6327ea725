//! Encounter table records.
//!
//! These are the typed shapes that cross the persistence boundary. Stores
//! decode their rows into these types and validate them on read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::weighted::{Weighted, WeightedEntry};

/// The kind of place an encounter table applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// A dungeon level, optionally a specific dungeon.
    Dungeon,
    /// Overland travel.
    Wilderness,
    /// Settlements.
    Town,
}

impl Scope {
    /// Parse a scope name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dungeon" => Some(Self::Dungeon),
            "wilderness" => Some(Self::Wilderness),
            "town" => Some(Self::Town),
            _ => None,
        }
    }

    /// The lowercase storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dungeon => "dungeon",
            Self::Wilderness => "wilderness",
            Self::Town => "town",
        }
    }

    /// All scopes.
    pub fn all() -> &'static [Self] {
        &[Self::Dungeon, Self::Wilderness, Self::Town]
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CoreError::InvalidArgument(format!(
                "scope must be 'dungeon', 'wilderness', or 'town' (got \"{s}\")"
            ))
        })
    }
}

/// Normalize a biome tag for matching: trimmed and lowercased. The empty
/// string is the wildcard biome.
pub fn normalize_biome(biome: &str) -> String {
    biome.trim().to_lowercase()
}

/// A stored encounter table (metadata only; entries are fetched by id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    /// Store-assigned id, increasing with creation order.
    pub id: i64,
    /// Where the table applies.
    pub scope: Scope,
    /// The specific dungeon this table belongs to, if any.
    pub scope_id: Option<i64>,
    /// Dungeon level or regional danger level (>= 1).
    pub level: u32,
    /// Terrain tag; empty means "any biome".
    pub biome: String,
    /// Human-readable name.
    pub name: String,
    /// Free-form metadata.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl EncounterTable {
    /// Whether this table applies to the given filter. A `None` scope id
    /// means "any instance"; biome comparison ignores case.
    pub fn matches(&self, scope: Scope, scope_id: Option<i64>, level: u32, biome: &str) -> bool {
        self.scope == scope
            && self.level == level
            && scope_id.is_none_or(|id| self.scope_id == Some(id))
            && self.biome.to_lowercase() == biome.to_lowercase()
    }
}

/// Request to create an encounter table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEncounterTable {
    /// Where the table applies.
    pub scope: Scope,
    /// The specific dungeon, if any.
    pub scope_id: Option<i64>,
    /// Danger level (>= 1).
    pub level: u32,
    /// Terrain tag ("" for any).
    pub biome: String,
    /// Table name.
    pub name: String,
    /// Free-form metadata.
    pub meta: Map<String, Value>,
}

impl NewEncounterTable {
    /// A level-1, any-biome table with no scope instance.
    pub fn new(scope: Scope, name: impl Into<String>) -> Self {
        Self {
            scope,
            scope_id: None,
            level: 1,
            biome: String::new(),
            name: name.into(),
            meta: Map::new(),
        }
    }

    /// Tie the table to a specific scope instance (e.g. a dungeon id).
    pub fn with_scope_id(mut self, scope_id: i64) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    /// Set the danger level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the biome tag.
    pub fn with_biome(mut self, biome: impl Into<String>) -> Self {
        self.biome = biome.into();
        self
    }

    /// Attach metadata.
    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = meta;
        self
    }

    /// Check the request and return it with its biome trimmed.
    pub fn validated(mut self) -> CoreResult<Self> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }
        if self.level == 0 {
            return Err(CoreError::InvalidArgument(
                "table level must be at least 1".to_string(),
            ));
        }
        self.biome = self.biome.trim().to_string();
        Ok(self)
    }

    /// Turn the request into a stored table with the given id.
    pub fn into_table(self, id: i64) -> EncounterTable {
        EncounterTable {
            id,
            scope: self.scope,
            scope_id: self.scope_id,
            level: self.level,
            biome: self.biome,
            name: self.name,
            meta: self.meta,
        }
    }
}

/// A weighted entry stored in an encounter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEntry {
    /// Store-assigned id.
    pub id: i64,
    /// Owning table.
    pub table_id: i64,
    /// Label, weight, and payload.
    #[serde(flatten)]
    pub entry: WeightedEntry,
}

impl Weighted for EncounterEntry {
    fn label(&self) -> &str {
        &self.entry.label
    }

    fn weight(&self) -> u32 {
        self.entry.weight
    }
}

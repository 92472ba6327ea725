//! In-memory encounter store.
//!
//! Useful for tests and for callers that assemble tables on the fly. Ids are
//! handed out sequentially, so creation order and id order agree.

use crate::encounter::{EncounterEntry, EncounterTable, NewEncounterTable, Scope};
use crate::error::{CoreError, CoreResult};
use crate::resolver::EncounterStore;
use crate::weighted::WeightedEntry;

/// Encounter tables and entries held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Vec<EncounterTable>,
    entries: Vec<EncounterEntry>,
    next_table_id: i64,
    next_entry_id: i64,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table and return it with its assigned id.
    pub fn create_table(&mut self, new: NewEncounterTable) -> CoreResult<EncounterTable> {
        let new = new.validated()?;
        self.next_table_id += 1;
        let table = new.into_table(self.next_table_id);
        self.tables.push(table.clone());
        Ok(table)
    }

    /// Append an entry to an existing table.
    pub fn add_entry(&mut self, table_id: i64, entry: WeightedEntry) -> CoreResult<EncounterEntry> {
        if !self.tables.iter().any(|t| t.id == table_id) {
            return Err(CoreError::InvalidArgument(format!(
                "encounter table {table_id} does not exist"
            )));
        }
        if entry.weight == 0 {
            return Err(CoreError::InvalidArgument(format!(
                "entry \"{}\" has weight 0; weights must be at least 1",
                entry.label
            )));
        }
        self.next_entry_id += 1;
        let stored = EncounterEntry {
            id: self.next_entry_id,
            table_id,
            entry,
        };
        self.entries.push(stored.clone());
        Ok(stored)
    }

    /// All tables in creation order.
    pub fn tables(&self) -> &[EncounterTable] {
        &self.tables
    }

    /// Look up a table by id.
    pub fn table(&self, table_id: i64) -> Option<&EncounterTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }
}

impl EncounterStore for MemoryStore {
    fn fetch_tables(
        &self,
        scope: Scope,
        scope_id: Option<i64>,
        level: u32,
        biome: &str,
    ) -> CoreResult<Vec<EncounterTable>> {
        Ok(self
            .tables
            .iter()
            .filter(|t| t.matches(scope, scope_id, level, biome))
            .cloned()
            .collect())
    }

    fn fetch_entries(&self, table_id: i64) -> CoreResult<Vec<EncounterEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.table_id == table_id)
            .cloned()
            .collect())
    }
}

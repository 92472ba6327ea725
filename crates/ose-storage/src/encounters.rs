//! Encounter table storage.
//!
//! Rows are read into raw structs first and converted into the core record
//! types afterwards, so every value that leaves this module has been checked.

use rusqlite::{OptionalExtension, Row, params};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use ose_core::{
    CoreResult, EncounterEntry, EncounterStore, EncounterTable, NewEncounterTable, Scope,
    WeightedEntry, normalize_biome,
};

use crate::CampaignDb;
use crate::error::{StorageError, StorageResult};

/// Starter entries for [`CampaignDb::seed_basic_dungeon_table`]: label,
/// weight, hit dice, and group size dice.
pub const BASIC_DUNGEON_ENTRIES: &[(&str, u32, u32, &str)] = &[
    ("Goblins (2d6)", 3, 1, "2d6"),
    ("Skeletons (2d6)", 3, 1, "2d6"),
    ("Giant Rats (3d6)", 2, 1, "3d6"),
    ("Bandits (2d6)", 2, 1, "2d6"),
    ("Ooze/Slime", 1, 2, "1"),
    ("Patrol (mixed)", 1, 2, "1d6+2"),
];

const TABLE_COLUMNS: &str = "id, scope, scope_id, level, biome, name, meta_json";
const ENTRY_COLUMNS: &str = "entry_id, table_id, weight, label, data_json";

struct TableRow {
    id: i64,
    scope: String,
    scope_id: Option<i64>,
    level: i64,
    biome: String,
    name: String,
    meta_json: String,
}

impl TableRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            scope: row.get(1)?,
            scope_id: row.get(2)?,
            level: row.get(3)?,
            biome: row.get(4)?,
            name: row.get(5)?,
            meta_json: row.get(6)?,
        })
    }
}

impl TryFrom<TableRow> for EncounterTable {
    type Error = StorageError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        let scope = Scope::parse(&row.scope).ok_or_else(|| {
            StorageError::InvalidRow(format!(
                "encounter table {} has unknown scope \"{}\"",
                row.id, row.scope
            ))
        })?;
        let level = u32::try_from(row.level)
            .ok()
            .filter(|l| *l >= 1)
            .ok_or_else(|| {
                StorageError::InvalidRow(format!(
                    "encounter table {} has invalid level {}",
                    row.id, row.level
                ))
            })?;
        Ok(EncounterTable {
            id: row.id,
            scope,
            scope_id: row.scope_id,
            level,
            biome: row.biome,
            name: row.name,
            meta: parse_object(&row.meta_json, "meta", row.id)?,
        })
    }
}

struct EntryRow {
    entry_id: i64,
    table_id: i64,
    weight: i64,
    label: String,
    data_json: String,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            entry_id: row.get(0)?,
            table_id: row.get(1)?,
            weight: row.get(2)?,
            label: row.get(3)?,
            data_json: row.get(4)?,
        })
    }
}

impl TryFrom<EntryRow> for EncounterEntry {
    type Error = StorageError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let weight = u32::try_from(row.weight)
            .ok()
            .filter(|w| *w >= 1)
            .ok_or_else(|| {
                warn!(
                    entry_id = row.entry_id,
                    weight = row.weight,
                    "rejecting stored entry with non-positive weight"
                );
                StorageError::InvalidRow(format!(
                    "entry {} (\"{}\") has invalid weight {}",
                    row.entry_id, row.label, row.weight
                ))
            })?;
        let payload = parse_object(&row.data_json, "data", row.entry_id)?;
        let entry = WeightedEntry::with_payload(row.label, weight, payload)
            .map_err(|e| StorageError::InvalidRow(format!("entry {}: {e}", row.entry_id)))?;
        Ok(EncounterEntry {
            id: row.entry_id,
            table_id: row.table_id,
            entry,
        })
    }
}

fn parse_object(raw: &str, column: &str, id: i64) -> StorageResult<Map<String, Value>> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(StorageError::InvalidRow(format!(
            "row {id}: {column} is not a JSON object: {other}"
        ))),
        Err(e) => Err(StorageError::InvalidRow(format!(
            "row {id}: {column} is not valid JSON: {e}"
        ))),
    }
}

impl CampaignDb {
    /// Create an encounter table.
    pub fn create_table(&self, new: NewEncounterTable) -> StorageResult<EncounterTable> {
        let new = new.validated()?;
        let meta_json = serde_json::to_string(&new.meta)?;
        self.conn.execute(
            "INSERT INTO encounter_tables (scope, scope_id, level, biome, name, meta_json) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.scope.as_str(),
                new.scope_id,
                new.level,
                new.biome,
                new.name,
                meta_json
            ],
        )?;
        let table = new.into_table(self.conn.last_insert_rowid());
        info!(
            table_id = table.id,
            scope = %table.scope,
            level = table.level,
            biome = %table.biome,
            "encounter table created"
        );
        Ok(table)
    }

    /// Look up a table by id.
    pub fn table(&self, table_id: i64) -> StorageResult<Option<EncounterTable>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {TABLE_COLUMNS} FROM encounter_tables WHERE id = ?1"),
                params![table_id],
                TableRow::from_row,
            )
            .optional()?;
        row.map(EncounterTable::try_from).transpose()
    }

    /// Append a weighted entry to a table.
    pub fn add_entry(&self, table_id: i64, entry: WeightedEntry) -> StorageResult<EncounterEntry> {
        if self.table(table_id)?.is_none() {
            return Err(StorageError::TableNotFound(table_id));
        }
        // Re-validate: the fields are public and may have been built by hand.
        let entry = WeightedEntry::with_payload(entry.label, entry.weight, entry.payload)?;
        let data_json = serde_json::to_string(&entry.payload)?;
        self.conn.execute(
            "INSERT INTO encounter_entries (table_id, weight, label, data_json) \
             VALUES (?1, ?2, ?3, ?4)",
            params![table_id, entry.weight, entry.label, data_json],
        )?;
        Ok(EncounterEntry {
            id: self.conn.last_insert_rowid(),
            table_id,
            entry,
        })
    }

    /// List tables, optionally filtered by scope and scope instance.
    ///
    /// Ordered by scope, scope id, level, biome, then id.
    pub fn list_tables(
        &self,
        scope: Option<Scope>,
        scope_id: Option<i64>,
    ) -> StorageResult<Vec<EncounterTable>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TABLE_COLUMNS} FROM encounter_tables \
             WHERE (?1 IS NULL OR lower(scope) = ?1) \
               AND (?2 IS NULL OR scope_id = ?2) \
             ORDER BY scope, scope_id, level, biome, id"
        ))?;
        let rows = stmt
            .query_map(params![scope.map(Scope::as_str), scope_id], TableRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(EncounterTable::try_from).collect()
    }

    /// Entries of a table in insertion order.
    pub fn list_entries(&self, table_id: i64) -> StorageResult<Vec<EncounterEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM encounter_entries WHERE table_id = ?1 ORDER BY entry_id"
        ))?;
        let rows = stmt
            .query_map(params![table_id], EntryRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(EncounterEntry::try_from).collect()
    }

    /// Tables matching one resolver filter, ordered by id.
    ///
    /// SQLite's `lower()` only folds ASCII, so the biome comparison runs in
    /// Rust on the rows that match scope, level and instance.
    pub fn matching_tables(
        &self,
        scope: Scope,
        scope_id: Option<i64>,
        level: u32,
        biome: &str,
    ) -> StorageResult<Vec<EncounterTable>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TABLE_COLUMNS} FROM encounter_tables \
             WHERE lower(scope) = ?1 \
               AND level = ?2 \
               AND (?3 IS NULL OR scope_id = ?3) \
             ORDER BY id"
        ))?;
        let rows = stmt
            .query_map(params![scope.as_str(), level, scope_id], TableRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        let biome = normalize_biome(biome);
        let mut tables = Vec::new();
        for row in rows {
            let table = EncounterTable::try_from(row)?;
            if table.matches(scope, scope_id, level, &biome) {
                tables.push(table);
            }
        }
        Ok(tables)
    }

    /// Create a starter dungeon table with generic old-school entries.
    ///
    /// The table is named `Dungeon <id> L<level>` and tied to `dungeon_id`.
    pub fn seed_basic_dungeon_table(
        &self,
        dungeon_id: i64,
        level: u32,
    ) -> StorageResult<(EncounterTable, Vec<EncounterEntry>)> {
        let tx = self.conn.unchecked_transaction()?;
        let table = self.create_table(
            NewEncounterTable::new(Scope::Dungeon, format!("Dungeon {dungeon_id} L{level}"))
                .with_scope_id(dungeon_id)
                .with_level(level),
        )?;
        let mut entries = Vec::with_capacity(BASIC_DUNGEON_ENTRIES.len());
        for (label, weight, hd, group) in BASIC_DUNGEON_ENTRIES {
            let payload = match json!({ "hd": hd, "group": group }) {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            entries.push(self.add_entry(
                table.id,
                WeightedEntry::with_payload(*label, *weight, payload)?,
            )?);
        }
        tx.commit()?;
        info!(table_id = table.id, dungeon_id, level, "seeded basic dungeon table");
        Ok((table, entries))
    }
}

impl EncounterStore for CampaignDb {
    fn fetch_tables(
        &self,
        scope: Scope,
        scope_id: Option<i64>,
        level: u32,
        biome: &str,
    ) -> CoreResult<Vec<EncounterTable>> {
        Ok(self.matching_tables(scope, scope_id, level, biome)?)
    }

    fn fetch_entries(&self, table_id: i64) -> CoreResult<Vec<EncounterEntry>> {
        Ok(self.list_entries(table_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ose_core::{CascadeStep, CoreError, EncounterQuery, resolve_encounter};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn db() -> CampaignDb {
        CampaignDb::open_in_memory().unwrap()
    }

    #[test]
    fn create_and_fetch_table() {
        let db = db();
        let mut meta = Map::new();
        meta.insert("source".to_string(), json!("homebrew"));
        let table = db
            .create_table(
                NewEncounterTable::new(Scope::Wilderness, "Fenlands")
                    .with_level(2)
                    .with_biome(" Swamp ")
                    .with_meta(meta),
            )
            .unwrap();
        assert_eq!(table.biome, "Swamp");
        let loaded = db.table(table.id).unwrap().unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded.meta["source"], "homebrew");
        assert!(db.table(table.id + 100).unwrap().is_none());
    }

    #[test]
    fn create_rejects_invalid_requests() {
        let db = db();
        let err = db
            .create_table(NewEncounterTable::new(Scope::Town, " "))
            .unwrap_err();
        assert!(matches!(err, StorageError::Core(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn entries_round_trip_with_payload() {
        let db = db();
        let table = db
            .create_table(NewEncounterTable::new(Scope::Dungeon, "L1"))
            .unwrap();
        let mut payload = Map::new();
        payload.insert("hd".to_string(), json!(1));
        db.add_entry(table.id, WeightedEntry::with_payload("Goblins", 3, payload).unwrap())
            .unwrap();
        db.add_entry(table.id, WeightedEntry::new("Rats", 2).unwrap())
            .unwrap();
        let entries = db.list_entries(table.id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry.label, "Goblins");
        assert_eq!(entries[0].entry.payload["hd"], 1);
        assert_eq!(entries[1].entry.weight, 2);
        assert!(entries[0].id < entries[1].id);
    }

    #[test]
    fn add_entry_to_missing_table_fails() {
        let db = db();
        let err = db
            .add_entry(42, WeightedEntry::new("Ghost", 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, StorageError::TableNotFound(42)));
    }

    #[test]
    fn add_entry_rejects_zero_weight() {
        let db = db();
        let table = db
            .create_table(NewEncounterTable::new(Scope::Dungeon, "L1"))
            .unwrap();
        let entry = WeightedEntry {
            label: "Nothing".to_string(),
            weight: 0,
            payload: Map::new(),
        };
        assert!(db.add_entry(table.id, entry).is_err());
        assert!(db.list_entries(table.id).unwrap().is_empty());
    }

    #[test]
    fn corrupt_weight_is_rejected_on_read() {
        let db = db();
        let table = db
            .create_table(NewEncounterTable::new(Scope::Dungeon, "L1"))
            .unwrap();
        db.conn
            .execute(
                "INSERT INTO encounter_entries (table_id, weight, label) VALUES (?1, -2, 'Bad')",
                params![table.id],
            )
            .unwrap();
        let err = db.list_entries(table.id).unwrap_err();
        assert!(matches!(err, StorageError::InvalidRow(ref m) if m.contains("invalid weight")));
    }

    #[test]
    fn corrupt_scope_is_rejected_on_read() {
        let db = db();
        db.conn
            .execute(
                "INSERT INTO encounter_tables (scope, level, name) VALUES ('castle', 1, 'Odd')",
                [],
            )
            .unwrap();
        assert!(matches!(
            db.list_tables(None, None),
            Err(StorageError::InvalidRow(_))
        ));
    }

    #[test]
    fn corrupt_json_is_rejected_on_read() {
        let db = db();
        db.conn
            .execute(
                "INSERT INTO encounter_tables (scope, level, name, meta_json) \
                 VALUES ('town', 1, 'Odd', '[1, 2]')",
                [],
            )
            .unwrap();
        assert!(matches!(
            db.list_tables(None, None),
            Err(StorageError::InvalidRow(ref m)) if m.contains("not a JSON object")
        ));
    }

    #[test]
    fn list_tables_filters_and_orders() {
        let db = db();
        db.create_table(NewEncounterTable::new(Scope::Wilderness, "Hills").with_biome("hills"))
            .unwrap();
        let d2 = db
            .create_table(
                NewEncounterTable::new(Scope::Dungeon, "D1 L2")
                    .with_scope_id(1)
                    .with_level(2),
            )
            .unwrap();
        let d1 = db
            .create_table(NewEncounterTable::new(Scope::Dungeon, "D1 L1").with_scope_id(1))
            .unwrap();
        db.create_table(NewEncounterTable::new(Scope::Dungeon, "D2 L1").with_scope_id(2))
            .unwrap();

        assert_eq!(db.list_tables(None, None).unwrap().len(), 4);

        let dungeon_one: Vec<i64> = db
            .list_tables(Some(Scope::Dungeon), Some(1))
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(dungeon_one, vec![d1.id, d2.id]);

        assert_eq!(db.list_tables(Some(Scope::Dungeon), None).unwrap().len(), 3);
        assert_eq!(db.list_tables(Some(Scope::Town), None).unwrap().len(), 0);
    }

    #[test]
    fn matching_is_case_insensitive_on_biome() {
        let db = db();
        let t = db
            .create_table(NewEncounterTable::new(Scope::Wilderness, "Forest").with_biome("Forest"))
            .unwrap();
        let found = db
            .matching_tables(Scope::Wilderness, None, 1, "FOREST")
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, t.id);
        assert!(db.matching_tables(Scope::Wilderness, None, 1, "").unwrap().is_empty());
    }

    #[test]
    fn matching_folds_non_ascii_biomes() {
        let db = db();
        let t = db
            .create_table(NewEncounterTable::new(Scope::Wilderness, "Waste").with_biome("Ödland"))
            .unwrap();
        for query in ["Ödland", "ödland", "ÖDLAND", " ödland "] {
            let found = db.matching_tables(Scope::Wilderness, None, 1, query).unwrap();
            assert_eq!(found.len(), 1, "{query}");
            assert_eq!(found[0].id, t.id);
        }

        let mut rng = StdRng::seed_from_u64(4);
        db.add_entry(t.id, WeightedEntry::new("Dust devils", 1).unwrap())
            .unwrap();
        let result = resolve_encounter(
            &db,
            &EncounterQuery::new(Scope::Wilderness).with_biome("Ödland"),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.matched, CascadeStep::Exact);
    }

    #[test]
    fn matching_respects_scope_instance() {
        let db = db();
        db.create_table(NewEncounterTable::new(Scope::Dungeon, "D5").with_scope_id(5))
            .unwrap();
        assert_eq!(db.matching_tables(Scope::Dungeon, Some(5), 1, "").unwrap().len(), 1);
        assert!(db.matching_tables(Scope::Dungeon, Some(6), 1, "").unwrap().is_empty());
        assert_eq!(db.matching_tables(Scope::Dungeon, None, 1, "").unwrap().len(), 1);
    }

    #[test]
    fn seed_basic_dungeon_table_creates_six_entries() {
        let db = db();
        let (table, entries) = db.seed_basic_dungeon_table(3, 2).unwrap();
        assert_eq!(table.name, "Dungeon 3 L2");
        assert_eq!(table.scope_id, Some(3));
        assert_eq!(table.level, 2);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].entry.payload["group"], "2d6");
        assert_eq!(db.list_entries(table.id).unwrap(), entries);
    }

    #[test]
    fn resolver_reads_through_the_store() {
        let db = db();
        let table = db
            .create_table(NewEncounterTable::new(Scope::Dungeon, "Dungeon 5 L1").with_scope_id(5))
            .unwrap();
        for (label, weight) in [("Goblins", 3), ("Skeletons", 3), ("Rats", 2)] {
            db.add_entry(table.id, WeightedEntry::new(label, weight).unwrap())
                .unwrap();
        }

        let query = EncounterQuery::new(Scope::Dungeon)
            .with_scope_id(Some(5))
            .with_biome("swamp");
        let mut rng = StdRng::seed_from_u64(9);
        let roll = resolve_encounter(&db, &query, &mut rng).unwrap();
        assert_eq!(roll.table.id, table.id);
        assert_eq!(roll.matched, CascadeStep::AnyBiome);
        assert!(["Goblins", "Skeletons", "Rats"].contains(&roll.entry.entry.label.as_str()));
    }

    #[test]
    fn resolver_sees_empty_and_missing_tables() {
        let db = db();
        let mut rng = StdRng::seed_from_u64(0);
        let query = EncounterQuery::new(Scope::Town);
        assert!(matches!(
            resolve_encounter(&db, &query, &mut rng),
            Err(CoreError::NotFound { .. })
        ));
        db.create_table(NewEncounterTable::new(Scope::Town, "Market"))
            .unwrap();
        assert!(matches!(
            resolve_encounter(&db, &query, &mut rng),
            Err(CoreError::EmptyTable { .. })
        ));
    }

    #[test]
    fn corrupt_rows_surface_as_store_errors_in_the_resolver() {
        let db = db();
        db.conn
            .execute(
                "INSERT INTO encounter_tables (scope, level, name, meta_json) \
                 VALUES ('town', 1, 'Odd', 'not json')",
                [],
            )
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = resolve_encounter(&db, &EncounterQuery::new(Scope::Town), &mut rng).unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert!(!err.is_recoverable());
    }
}

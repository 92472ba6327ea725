//! Database schema setup.

use rusqlite::Connection;

use crate::error::StorageResult;

/// Create every table the campaign store needs. Safe to run repeatedly.
pub(crate) fn run_migrations(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        -- Encounter tables (dungeon / wilderness / town)
        CREATE TABLE IF NOT EXISTS encounter_tables (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope TEXT NOT NULL,
            scope_id INTEGER,
            level INTEGER NOT NULL DEFAULT 1,
            biome TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            meta_json TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_encounter_tables_lookup
            ON encounter_tables(scope, level);

        -- Weighted entries, one row per outcome
        CREATE TABLE IF NOT EXISTS encounter_entries (
            entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
            table_id INTEGER NOT NULL,
            weight INTEGER NOT NULL DEFAULT 1,
            label TEXT NOT NULL,
            data_json TEXT NOT NULL DEFAULT '{}',
            FOREIGN KEY (table_id) REFERENCES encounter_tables(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_encounter_entries_table
            ON encounter_entries(table_id);

        -- Single-row oracle state
        CREATE TABLE IF NOT EXISTS oracle_state (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            chaos INTEGER NOT NULL DEFAULT 5
        );
        "#,
    )?;
    Ok(())
}

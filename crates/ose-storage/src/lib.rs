//! SQLite campaign store for the OSE campaign tools.
//!
//! [`CampaignDb`] owns one SQLite connection. It persists encounter tables and
//! their weighted entries, plus the oracle's chaos factor, and implements
//! [`ose_core::EncounterStore`] so the resolver can read from it directly.

mod encounters;
/// Error types for the store.
pub mod error;
mod migrations;
mod oracle;

pub use encounters::BASIC_DUNGEON_ENTRIES;
pub use error::{StorageError, StorageResult};

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

/// Campaign database backed by SQLite.
pub struct CampaignDb {
    conn: Connection,
}

impl CampaignDb {
    /// Open or create the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self::init(conn)?;
        info!(path = %path.display(), "campaign database opened");
        Ok(db)
    }

    /// Open a throwaway database that lives only as long as the value.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

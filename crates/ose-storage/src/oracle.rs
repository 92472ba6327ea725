//! Oracle state storage.

use rusqlite::{OptionalExtension, params};

use crate::CampaignDb;
use crate::error::StorageResult;

const DEFAULT_CHAOS: u32 = 5;

impl CampaignDb {
    /// The stored chaos factor, or 5 if none has been set.
    pub fn chaos(&self) -> StorageResult<u32> {
        let stored: Option<i64> = self
            .conn
            .query_row("SELECT chaos FROM oracle_state WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        // Out-of-range rows are clamped rather than rejected.
        Ok(stored
            .map(|c| c.clamp(1, 9) as u32)
            .unwrap_or(DEFAULT_CHAOS))
    }

    /// Store a chaos factor, clamped to 1-9, and return the stored value.
    pub fn set_chaos(&self, chaos: u32) -> StorageResult<u32> {
        let chaos = chaos.clamp(1, 9);
        self.conn.execute(
            "INSERT INTO oracle_state (id, chaos) VALUES (1, ?1) \
             ON CONFLICT(id) DO UPDATE SET chaos = excluded.chaos",
            params![chaos],
        )?;
        Ok(chaos)
    }
}

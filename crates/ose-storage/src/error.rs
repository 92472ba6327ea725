//! Error types for the campaign store.

use ose_core::CoreError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by [`crate::CampaignDb`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// SQLite failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A JSON column could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The database file or its directory could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A request was rejected by core validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The referenced encounter table does not exist.
    #[error("encounter table {0} not found")]
    TableNotFound(i64),

    /// A stored row failed validation on read.
    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Core(core) => core,
            other => CoreError::store(other),
        }
    }
}

//! Error types for the solo GM generators.

use ose_core::CoreError;
use thiserror::Error;

/// Result type for solo generator operations.
pub type SoloResult<T> = Result<T, SoloError>;

/// Errors raised by the oracle, stocking, and treasure generators.
#[derive(Debug, Error)]
pub enum SoloError {
    /// Invalid likelihood string.
    #[error("invalid likelihood: {0}")]
    InvalidLikelihood(String),

    /// Invalid treasure kind string.
    #[error("invalid treasure kind: {0} (expected \"individual\" or \"hoard\")")]
    InvalidTreasureKind(String),

    /// Table picking failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

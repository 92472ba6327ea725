use crate::encounter::Scope;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by table picking and encounter resolution.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A caller-supplied argument was malformed (empty entry list, zero weight,
    /// unknown scope, level below 1, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No stored table matched any step of the resolution cascade.
    #[error("no matching encounter table for {scope} level {level} (scope id {scope_id:?}, biome \"{biome}\")")]
    NotFound {
        /// The requested scope.
        scope: Scope,
        /// The requested scope instance, if any.
        scope_id: Option<i64>,
        /// The requested danger level.
        level: u32,
        /// The requested biome (normalized).
        biome: String,
    },

    /// A table matched but has no entries to pick from.
    #[error("encounter table {table_id} has no entries")]
    EmptyTable {
        /// The id of the matched table.
        table_id: i64,
    },

    /// The persistence collaborator failed.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Whether the caller is expected to branch on this error (roll a generic
    /// encounter, relax parameters, show a message) rather than abort.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Wrap any store-side error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}

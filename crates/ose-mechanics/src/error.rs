//! Error types for the mechanics crate.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice expression could not be parsed or is out of range.
    #[error("bad dice expression '{expr}': {reason} (example: 3d6+1)")]
    InvalidExpression {
        /// The expression as given.
        expr: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl MechError {
    pub(crate) fn invalid(expr: &str, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error surface for the opt-in `validate`/`try_query` path.
///
/// The fluent API itself is fail-open: a malformed call is a silent no-op
/// and the chain continues. Builders record the first rejected call so it
/// can be surfaced here on demand.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fluent call was silently rejected (column/value count mismatch or similar)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A placeholder token has no bound value
    #[error("Unbound placeholder: {0}")]
    Unbound(String),
}

impl BuildError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an unbound-placeholder error
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::Unbound(_))
    }
}

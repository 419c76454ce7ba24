//! Error types for the resource model.

use thiserror::Error;

/// Errors produced while constructing resource model types.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A key name did not conform to the required pattern.
    #[error("key name must conform to the pattern {pattern}")]
    InvalidKeyName {
        /// The pattern the name must match.
        pattern: &'static str,
    },
}

/// Result type alias for resource model operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the credential lifecycle engine.
//!
//! The engine distinguishes errors by the scope they poison. An
//! [`EngineError`] aborts a whole run before or during discovery. A
//! [`DocumentError`] is confined to one document inside one file: the
//! document's original bytes are preserved and the error surfaces only in
//! the run report. File-level write failures are carried as report entries,
//! not errors, so one bad file never stops the run.

use std::path::PathBuf;

use kanali_validation::ValidationError;
use thiserror::Error;

/// Errors that abort an entire engine run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The filesystem walk under the root failed.
    #[error("failed to walk {path}: {source}")]
    Discovery {
        /// The root that was being walked.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Errors confined to a single document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document carried the secret-bearing kind but did not unmarshal
    /// into an `ApiKey` resource.
    #[error("parse failed: {reason}")]
    Parse {
        /// The deserialization failure.
        reason: String,
    },

    /// The document failed the semantic validation gate.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The document's ciphertext did not decrypt under the old private key.
    #[error("{0}")]
    Decrypt(kanali_crypto::Error),

    /// The recovered secret did not encrypt under the new public key.
    #[error("{0}")]
    Encrypt(kanali_crypto::Error),

    /// The rotated resource did not serialize back to YAML.
    #[error("serialization failed: {reason}")]
    Serialize {
        /// The serialization failure.
        reason: String,
    },

    /// The document's bytes could not be written to the staged file.
    #[error("write failed: {reason}")]
    Write {
        /// The underlying I/O failure.
        reason: String,
    },
}

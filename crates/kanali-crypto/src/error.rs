//! Error types for credential generation and the RSA-OAEP codec.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating, encrypting or decrypting
/// credentials.
#[derive(Debug, Error)]
pub enum Error {
    /// No public key was provided for encryption.
    #[error("no public key provided")]
    NoKey,

    /// Key material could not be read from disk.
    #[error("failed to read key file {path}: {source}")]
    KeyFileRead {
        /// Path of the unreadable key file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Key material parsed, but not into an RSA key of the expected shape.
    #[error("invalid key material: {reason}")]
    InvalidKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// A caller-supplied secret did not match the allowed pattern.
    #[error("key data must conform to the pattern {pattern}")]
    InvalidFormat {
        /// The pattern secret material must match.
        pattern: &'static str,
    },

    /// A zero length was requested for a generated secret.
    #[error("key length must be greater than zero")]
    InvalidLength,

    /// Ciphertext was not valid hex.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(#[from] hex::FromHexError),

    /// RSA-OAEP decryption failed: wrong key, corrupted ciphertext, or
    /// label mismatch.
    #[error("decryption failed: {0}")]
    DecryptFailed(rsa::Error),

    /// RSA-OAEP encryption failed, e.g. the plaintext exceeds what the
    /// modulus can carry.
    #[error("encryption failed: {0}")]
    EncryptFailed(rsa::Error),
}

/// Result type alias for credential operations.
pub type Result<T> = std::result::Result<T, Error>;

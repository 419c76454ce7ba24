//! Validation of `ApiKey` resources.

use kanali_spec::ApiKey;
use tracing::debug;

use crate::error::{Result, ValidationError};

/// Checks that an `ApiKey` document is a well-formed credential carrier.
///
/// This is the gate the rotation engine runs before attempting any
/// cryptography on a document: a key with no ciphertext data has nothing to
/// rotate and is rejected here rather than surfacing as a decrypt failure.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyKeyData`] when `spec.data` is empty.
pub fn validate_api_key(key: &ApiKey) -> Result {
    if key.spec.data.is_empty() {
        return Err(ValidationError::EmptyKeyData);
    }
    debug!(name = %key.metadata.name, "api key document validated");
    Ok(())
}

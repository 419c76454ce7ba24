//! RSA key loading from PEM material.
//!
//! Private keys are PKCS#1 PEM files. Public keys are PKIX/SPKI PEM files,
//! and the argument may alternatively be the literal PEM text itself, which
//! keeps scripted invocations from having to write a temporary file.

use std::fs;
use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::error::{Error, Result};

/// Loads a PKCS#1 PEM-encoded RSA private key from a file.
///
/// # Errors
///
/// Returns [`Error::KeyFileRead`] when the file cannot be read and
/// [`Error::InvalidKey`] when its contents do not parse as an RSA private
/// key.
pub fn load_private_key(location: &Path) -> Result<RsaPrivateKey> {
    let pem = fs::read_to_string(location).map_err(|source| Error::KeyFileRead {
        path: location.to_path_buf(),
        source,
    })?;

    let key = RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|e| Error::InvalidKey {
        reason: e.to_string(),
    })?;
    debug!(path = %location.display(), "loaded RSA private key");
    Ok(key)
}

/// Loads a PKIX PEM-encoded RSA public key.
///
/// `location` is first treated as a file path; when no such file can be
/// read, the argument itself is parsed as literal PEM text.
///
/// # Errors
///
/// Returns [`Error::NoKey`] when `location` is empty and
/// [`Error::InvalidKey`] when the material does not parse as an RSA public
/// key (including keys of a different algorithm).
pub fn load_public_key(location: &str) -> Result<RsaPublicKey> {
    if location.is_empty() {
        return Err(Error::NoKey);
    }

    let pem = match fs::read_to_string(location) {
        Ok(contents) => contents,
        Err(_) => location.to_string(),
    };

    let key = RsaPublicKey::from_public_key_pem(&pem).map_err(|e| Error::InvalidKey {
        reason: e.to_string(),
    })?;
    debug!("loaded RSA public key");
    Ok(key)
}

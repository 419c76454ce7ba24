//! RSA-OAEP encryption and decryption of API key material.
//!
//! Ciphertexts are hex-encoded so they can sit in YAML/JSON documents as
//! plain strings. Both directions fold the fixed [`OAEP_LABEL`] into the
//! padding; a ciphertext produced under a different label will not decrypt.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::secret::Secret;

/// Domain-separation label folded into every OAEP operation.
pub const OAEP_LABEL: &str = "kanali";

fn oaep() -> Oaep {
    Oaep::new_with_label::<Sha256, _>(OAEP_LABEL)
}

/// Encrypts a secret under the given public key using the OS CSPRNG,
/// returning the hex-encoded ciphertext.
///
/// # Errors
///
/// Returns [`Error::NoKey`] when no key is supplied and
/// [`Error::EncryptFailed`] when the RSA operation fails.
pub fn encrypt(secret: &Secret, public_key: Option<&RsaPublicKey>) -> Result<String> {
    encrypt_with(&mut OsRng, secret, public_key)
}

/// Encrypts a secret under the given public key with a caller-supplied
/// random source, returning the hex-encoded ciphertext.
///
/// # Errors
///
/// Returns [`Error::NoKey`] when no key is supplied and
/// [`Error::EncryptFailed`] when the RSA operation fails.
pub fn encrypt_with<R: CryptoRng + RngCore>(
    rng: &mut R,
    secret: &Secret,
    public_key: Option<&RsaPublicKey>,
) -> Result<String> {
    let key = public_key.ok_or(Error::NoKey)?;
    let ciphertext = key
        .encrypt(rng, oaep(), secret.as_bytes())
        .map_err(Error::EncryptFailed)?;
    Ok(hex::encode(ciphertext))
}

/// Decrypts a hex-encoded ciphertext with the given private key.
///
/// # Errors
///
/// Returns [`Error::MalformedCiphertext`] when the input is not valid hex
/// and [`Error::DecryptFailed`] when the RSA operation fails (wrong key,
/// corrupted ciphertext, or label mismatch).
pub fn decrypt(ciphertext: &str, private_key: &RsaPrivateKey) -> Result<Secret> {
    let raw = hex::decode(ciphertext)?;
    let plaintext = private_key
        .decrypt(oaep(), &raw)
        .map_err(Error::DecryptFailed)?;
    Ok(Secret::new(plaintext))
}

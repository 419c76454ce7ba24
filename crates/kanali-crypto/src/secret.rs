//! Plaintext API key material and its generation.
//!
//! Generated secrets are drawn uniformly from a 62-character alphanumeric
//! alphabet by pulling 6-bit chunks out of a wide random word and discarding
//! chunks that fall outside the alphabet, so no character is favored. The
//! random source is passed in by the caller; [`generate`] uses the OS CSPRNG.

use std::fmt;

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use regex::Regex;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Pattern caller-supplied secret material must match.
pub const KEY_DATA_PATTERN: &str = "^[0-9a-zA-Z]+$";

#[allow(clippy::expect_used)]
static KEY_DATA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(KEY_DATA_PATTERN).expect("key data pattern is a valid regex"));

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// 6 bits represent one alphabet index; a 64-bit word yields ten chunks.
const CHUNK_BITS: u32 = 6;
const CHUNK_MASK: u64 = (1 << CHUNK_BITS) - 1;
const CHUNKS_PER_WORD: u32 = u64::BITS / CHUNK_BITS;

/// A plaintext API key. Zeroizes its buffer on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /// Wraps raw plaintext bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the plaintext bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the plaintext length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Renders the plaintext for operator display. Generated and
    /// caller-supplied secrets are always ASCII; decrypted foreign bytes are
    /// replaced rather than panicking.
    #[must_use]
    pub fn display(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").field("bytes", &"[REDACTED]").finish()
    }
}

/// Generates an API key using the OS CSPRNG.
///
/// See [`generate_with`] for the contract.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] or [`Error::InvalidLength`].
pub fn generate(existing: &str, length: usize) -> Result<Secret> {
    generate_with(&mut OsRng, existing, length)
}

/// Generates an API key from the given random source.
///
/// A non-empty `existing` value is validated against [`KEY_DATA_PATTERN`]
/// and returned verbatim; `length` is ignored on that path. Otherwise a
/// fresh secret of exactly `length` characters is drawn uniformly from the
/// 62-character alphanumeric alphabet.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when `existing` does not match the
/// pattern, or [`Error::InvalidLength`] when a fresh secret of zero length
/// is requested.
pub fn generate_with<R: RngCore + ?Sized>(
    rng: &mut R,
    existing: &str,
    length: usize,
) -> Result<Secret> {
    if !existing.is_empty() {
        if !KEY_DATA_REGEX.is_match(existing) {
            return Err(Error::InvalidFormat {
                pattern: KEY_DATA_PATTERN,
            });
        }
        return Ok(Secret::new(existing.as_bytes().to_vec()));
    }

    if length == 0 {
        return Err(Error::InvalidLength);
    }

    let mut bytes = Vec::with_capacity(length);
    let mut cache = rng.next_u64();
    let mut remaining = CHUNKS_PER_WORD;
    while bytes.len() < length {
        if remaining == 0 {
            cache = rng.next_u64();
            remaining = CHUNKS_PER_WORD;
        }
        // Chunks past the end of the alphabet are discarded, not wrapped;
        // wrapping would bias the low end of the alphabet.
        let index = (cache & CHUNK_MASK) as usize;
        if index < ALPHABET.len() {
            bytes.push(ALPHABET[index]);
        }
        cache >>= CHUNK_BITS;
        remaining -= 1;
    }

    Ok(Secret::new(bytes))
}

//! # Kanali Crypto
//!
//! API key generation and the RSA-OAEP codec for Kanali credentials:
//!
//! - **Secret generation**: uniformly distributed alphanumeric keys drawn
//!   from an injectable random source (the OS CSPRNG by default)
//! - **Encryption**: RSA-OAEP with SHA-256 and a fixed domain-separation
//!   label, hex-encoded for embedding in config documents
//! - **Key loading**: PKCS#1 PEM private keys and PKIX PEM public keys,
//!   with literal PEM text accepted for the public key argument
//!
//! ## Example
//!
//! ```rust
//! use kanali_crypto::{decrypt, encrypt, generate};
//! use rand::rngs::OsRng;
//!
//! let keypair = rsa::RsaPrivateKey::new(&mut OsRng, 2048).expect("keypair");
//! let public = keypair.to_public_key();
//!
//! let secret = generate("", 32).expect("generate");
//! let ciphertext = encrypt(&secret, Some(&public)).expect("encrypt");
//! let recovered = decrypt(&ciphertext, &keypair).expect("decrypt");
//! assert_eq!(recovered.as_bytes(), secret.as_bytes());
//! ```
//!
//! ## Security Considerations
//!
//! - Plaintext secrets use `zeroize` to clear memory on drop
//! - Debug output for secrets is redacted
//! - Encryption and decryption must use the identical OAEP label or
//!   decryption fails

pub mod codec;
pub mod error;
pub mod keys;
pub mod secret;

pub use codec::{decrypt, encrypt, encrypt_with, OAEP_LABEL};
pub use error::{Error, Result};
pub use keys::{load_private_key, load_public_key};
pub use secret::{generate, generate_with, Secret, KEY_DATA_PATTERN};

// Downstream crates speak in these key handles without needing their own
// `rsa` dependency.
pub use rsa::{RsaPrivateKey, RsaPublicKey};

//! The decryption batch runner: recovers every `ApiKey` plaintext under a
//! root for operator inspection.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use kanali_crypto::{codec, RsaPrivateKey};
use kanali_spec::{ApiKey, KIND_API_KEY};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::types::{DecryptReport, DecryptRow};
use crate::{pool, scanner};

/// Decrypts every `ApiKey` document under a root with one private key.
#[derive(Debug)]
pub struct DecryptRunner {
    key: Arc<RsaPrivateKey>,
    worker_limit: usize,
}

impl DecryptRunner {
    /// Creates a runner decrypting under `key`.
    #[must_use]
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            key: Arc::new(key),
            worker_limit: pool::worker_limit(),
        }
    }

    /// Overrides the bounded pool's worker count.
    #[must_use]
    pub fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit;
        self
    }

    /// Decrypts every `ApiKey` under `root`, one report row per document.
    ///
    /// A row's data is the recovered plaintext or, when decryption fails,
    /// the error text. Documents that are not API keys or do not parse are
    /// skipped without a row.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Discovery`] when the filesystem walk fails.
    pub async fn run(&self, root: &Path) -> Result<DecryptReport, EngineError> {
        let files = scanner::discover(root)?;
        info!(root = %root.display(), files = files.len(), "starting batch decryption");

        let key = Arc::clone(&self.key);
        let per_file = pool::map_files(files, self.worker_limit, move |path| {
            decrypt_file(&path, &key)
        })
        .await;

        let rows: Vec<DecryptRow> = per_file.into_iter().flatten().collect();
        info!(rows = rows.len(), "batch decryption finished");
        Ok(DecryptReport { rows })
    }
}

fn decrypt_file(path: &Path, key: &RsaPrivateKey) -> Vec<DecryptRow> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            return Vec::new();
        }
    };

    scanner::split(&data)
        .filter_map(|document| decrypt_document(document, key))
        .collect()
}

fn decrypt_document(document: &[u8], key: &RsaPrivateKey) -> Option<DecryptRow> {
    let kind = scanner::probe_kind(document)?;
    if kind != KIND_API_KEY {
        return None;
    }

    let api_key: ApiKey = serde_yaml::from_slice(document).ok()?;
    let data = match codec::decrypt(&api_key.spec.data, key) {
        Ok(secret) => secret.display(),
        Err(e) => e.to_string(),
    };
    Some(DecryptRow {
        name: api_key.metadata.name,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanali_crypto::{encrypt, generate, Secret};
    use once_cell::sync::Lazy;
    use rand::rngs::OsRng;

    static TEST_KEY: Lazy<RsaPrivateKey> =
        Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("generate test key"));

    fn api_key_document(name: &str, data: &str) -> Vec<u8> {
        format!(
            "kind: ApiKey\napiVersion: kanali.io/v1\nmetadata:\n  name: {name}\n  namespace: default\nspec:\n  data: {data}\n"
        )
        .into_bytes()
    }

    #[test]
    fn non_api_key_documents_yield_no_row() {
        assert!(decrypt_document(b"kind: ConfigMap\n", &TEST_KEY).is_none());
        assert!(decrypt_document(b"\t{]unbalanced", &TEST_KEY).is_none());
    }

    #[test]
    fn recovered_plaintext_lands_in_the_row() {
        let secret = generate("", 24).expect("generate");
        let ciphertext =
            encrypt(&secret, Some(&TEST_KEY.to_public_key())).expect("encrypt");

        let row = decrypt_document(&api_key_document("my-key", &ciphertext), &TEST_KEY)
            .expect("row");
        assert_eq!(row.name, "my-key");
        assert_eq!(row.data, secret.display());
    }

    #[test]
    fn decrypt_failure_lands_as_error_text() {
        let other = RsaPrivateKey::new(&mut OsRng, 2048).expect("generate");
        let secret = Secret::new(b"plaintext".to_vec());
        let ciphertext =
            encrypt(&secret, Some(&other.to_public_key())).expect("encrypt");

        let row = decrypt_document(&api_key_document("stale-key", &ciphertext), &TEST_KEY)
            .expect("row");
        assert_eq!(row.name, "stale-key");
        assert!(row.data.contains("decryption failed"));
    }
}

//! The rotation coordinator: re-encrypts every `ApiKey` document under a
//! root from an old keypair to a new one.
//!
//! Each file moves through scanning (read + split), transforming (per
//! document), staging (write every document to a `<name>_staged` sibling)
//! and committing (atomic rename over the original). The rename happens
//! only when every staged write succeeded and at least one document in the
//! file was secret-bearing; a file that rotates nothing is never rewritten
//! at all.
//!
//! Commit is deliberately not gated on document-level transform failures:
//! a document that failed to decrypt or validate writes its original bytes
//! through and the file still commits, trading strict all-or-nothing
//! rotation for maximal partial progress. Only the write itself is atomic.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kanali_crypto::{codec, RsaPrivateKey, RsaPublicKey};
use kanali_spec::{ApiKey, KIND_API_KEY};
use kanali_validation::validate_api_key;
use tracing::{debug, info, warn};

use crate::error::{DocumentError, EngineError};
use crate::types::{FileFailure, RotationJob, RotationRecord, RotationReport};
use crate::{pool, scanner, STAGED_SUFFIX};

/// Rotates every `ApiKey` ciphertext under a root between two RSA keypairs.
#[derive(Debug)]
pub struct Rotator {
    old_key: Arc<RsaPrivateKey>,
    new_key: Arc<RsaPublicKey>,
    worker_limit: usize,
}

/// Everything learned about one file during a rotation run.
struct FileOutcome {
    file: PathBuf,
    jobs: Vec<RotationJob>,
    error: Option<String>,
}

impl Rotator {
    /// Creates a rotator decrypting under `old_key` and re-encrypting under
    /// `new_key`.
    #[must_use]
    pub fn new(old_key: RsaPrivateKey, new_key: RsaPublicKey) -> Self {
        Self {
            old_key: Arc::new(old_key),
            new_key: Arc::new(new_key),
            worker_limit: pool::worker_limit(),
        }
    }

    /// Overrides the bounded pool's worker count.
    #[must_use]
    pub fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit;
        self
    }

    /// Rotates every config file under `root` and reports the outcome.
    ///
    /// Document- and file-level failures are confined to the report; only
    /// discovery failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Discovery`] when the filesystem walk fails.
    pub async fn run(&self, root: &Path) -> Result<RotationReport, EngineError> {
        let files = scanner::discover(root)?;
        info!(root = %root.display(), files = files.len(), "starting rotation");

        let old_key = Arc::clone(&self.old_key);
        let new_key = Arc::clone(&self.new_key);
        let outcomes = pool::map_files(files, self.worker_limit, move |path| {
            rotate_file(&path, &old_key, &new_key)
        })
        .await;

        let mut report = RotationReport::default();
        for outcome in outcomes {
            if let Some(error) = outcome.error {
                report.failed_files.push(FileFailure {
                    file: outcome.file,
                    error,
                });
            }
            for job in outcome.jobs {
                report.processed += 1;
                if job.error.is_none() {
                    report.succeeded += 1;
                } else {
                    report.failed += 1;
                }
                if job.is_api_key {
                    report.records.push(RotationRecord {
                        name: job.name,
                        namespace: job.namespace,
                        file: job.file,
                        rotated: job.error.is_none(),
                        error: job.error.map(|e| e.to_string()),
                    });
                }
            }
        }

        info!(
            processed = report.processed,
            succeeded = report.succeeded,
            failed = report.failed,
            "rotation finished"
        );
        Ok(report)
    }
}

/// Runs one file through the scan/transform/stage/commit pipeline.
fn rotate_file(path: &Path, old_key: &RsaPrivateKey, new_key: &RsaPublicKey) -> FileOutcome {
    let mut outcome = FileOutcome {
        file: path.to_path_buf(),
        jobs: Vec::new(),
        error: None,
    };

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            outcome.error = Some(format!("failed to read file: {e}"));
            return outcome;
        }
    };

    outcome.jobs = scanner::split(&data)
        .map(|document| transform_document(path, document, old_key, new_key))
        .collect();

    let api_key_count = outcome.jobs.iter().filter(|job| job.is_api_key).count();
    if outcome.jobs.is_empty() || api_key_count == 0 {
        debug!(path = %path.display(), "no api key documents, leaving file untouched");
        return outcome;
    }

    outcome.error = stage_and_commit(path, &mut outcome.jobs);
    outcome
}

/// Builds the job for a single document.
fn transform_document(
    path: &Path,
    document: &[u8],
    old_key: &RsaPrivateKey,
    new_key: &RsaPublicKey,
) -> RotationJob {
    let mut job = RotationJob::copy_through(path, document);

    // Documents the engine cannot classify are passed through untouched;
    // their raw bytes are the source of truth.
    let Some(kind) = scanner::probe_kind(document) else {
        return job;
    };
    if kind != KIND_API_KEY {
        return job;
    }
    job.is_api_key = true;

    let api_key: ApiKey = match serde_yaml::from_slice(document) {
        Ok(api_key) => api_key,
        Err(e) => {
            job.error = Some(DocumentError::Parse {
                reason: e.to_string(),
            });
            return job;
        }
    };
    job.name = api_key.metadata.name.clone();
    job.namespace = api_key.metadata.namespace.clone();

    if let Err(e) = validate_api_key(&api_key) {
        job.error = Some(DocumentError::Validation(e));
        return job;
    }

    let secret = match codec::decrypt(&api_key.spec.data, old_key) {
        Ok(secret) => secret,
        Err(e) => {
            job.error = Some(DocumentError::Decrypt(e));
            return job;
        }
    };

    let ciphertext = match codec::encrypt(&secret, Some(new_key)) {
        Ok(ciphertext) => ciphertext,
        Err(e) => {
            job.error = Some(DocumentError::Encrypt(e));
            return job;
        }
    };

    match serde_yaml::to_string(&api_key.with_data(ciphertext)) {
        Ok(yaml) => {
            debug!(name = %job.name, namespace = %job.namespace, "rotated api key document");
            job.replacement = Some(yaml.into_bytes());
        }
        Err(e) => {
            job.error = Some(DocumentError::Serialize {
                reason: e.to_string(),
            });
        }
    }
    job
}

/// Writes every job to the staged sibling and renames it over the original
/// iff no write failed. Returns the file-level error text, if any.
fn stage_and_commit(path: &Path, jobs: &mut [RotationJob]) -> Option<String> {
    let staged = staged_path(path);
    let file = match File::create(&staged) {
        Ok(file) => file,
        Err(e) => return Some(format!("failed to create staged file: {e}")),
    };
    let mut writer = BufWriter::new(file);

    let mut write_error = false;
    let mut previous_ended_with_newline = true;
    for (index, job) in jobs.iter_mut().enumerate() {
        if index != 0 {
            let separator: &[u8] = if previous_ended_with_newline {
                b"---\n"
            } else {
                b"\n---\n"
            };
            if writer.write_all(separator).is_err() {
                write_error = true;
            }
        }

        let bytes = job.replacement.as_deref().unwrap_or(&job.original);
        if let Err(e) = writer.write_all(bytes) {
            // Keep writing the remaining jobs so the staged file reflects
            // the attempted state for diagnostics.
            write_error = true;
            job.error = Some(DocumentError::Write {
                reason: e.to_string(),
            });
        }
        previous_ended_with_newline = bytes.last() == Some(&b'\n');
    }

    if let Err(e) = writer.flush() {
        write_error = true;
        warn!(staged = %staged.display(), error = %e, "failed to flush staged file");
    }

    if write_error {
        warn!(
            staged = %staged.display(),
            "staged write failed, original left untouched"
        );
        return Some(format!(
            "staged write failed, staged file retained at {}",
            staged.display()
        ));
    }

    if let Err(e) = fs::rename(&staged, path) {
        return Some(format!("failed to commit staged file: {e}"));
    }
    debug!(path = %path.display(), "committed rotated file");
    None
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from(STAGED_SUFFIX),
        std::ffi::OsStr::to_os_string,
    );
    name.push(STAGED_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_path_appends_the_suffix_in_place() {
        assert_eq!(
            staged_path(Path::new("/etc/kanali/keys.yaml")),
            PathBuf::from("/etc/kanali/keys.yaml_staged")
        );
        assert_eq!(staged_path(Path::new("keys.yml")), PathBuf::from("keys.yml_staged"));
    }
}

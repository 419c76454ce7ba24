//! Bounded fan-out over a discovered file list.
//!
//! Every engine run materializes its file list up front, spawns one task
//! per file gated by a semaphore, and drains the results through a single
//! join loop into one collection. The file work itself is synchronous
//! (reads, RSA, writes) and runs on the blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

/// Upper bound on concurrently processed files.
pub(crate) const MAX_WORKERS: usize = 8;

/// Worker count for this host, capped at [`MAX_WORKERS`].
pub(crate) fn worker_limit() -> usize {
    std::thread::available_parallelism().map_or(4, usize::from).min(MAX_WORKERS)
}

/// Runs `work` over every file with at most `limit` files in flight,
/// returning the results in the input's order.
pub(crate) async fn map_files<T, F>(files: Vec<PathBuf>, limit: usize, work: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(PathBuf) -> T + Clone + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let work = work.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // The semaphore is never closed; a failed acquire leaves the
            // task unbounded rather than stalling the run.
            let _permit = semaphore.acquire_owned().await.ok();
            let result = tokio::task::spawn_blocking(move || work(path)).await;
            (index, result)
        });
    }

    let mut indexed = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(value))) => indexed.push((index, value)),
            Ok((_, Err(join_error))) | Err(join_error) => {
                error!(error = %join_error, "file worker did not complete");
            }
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, value)| value).collect()
}

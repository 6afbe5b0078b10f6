use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::{FeedloomError, Result};
use crate::domain::Feed;
use crate::loader::Loader;
use crate::normalizer::Normalizer;

pub const DEFAULT_WORKERS: usize = 10;

/// Normalizes many documents at once, at most `workers` in flight.
pub struct ParallelNormalizer {
    loader: Arc<dyn Loader + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelNormalizer {
    pub fn new(loader: Arc<dyn Loader + Send + Sync>) -> Self {
        Self::with_workers(loader, DEFAULT_WORKERS)
    }

    pub fn with_workers(loader: Arc<dyn Loader + Send + Sync>, workers: usize) -> Self {
        Self {
            loader,
            semaphore: Arc::new(Semaphore::new(workers.clamp(1, Semaphore::MAX_PERMITS))),
        }
    }

    /// Results come back in the order of `paths`.
    pub async fn normalize_all(
        &self,
        paths: Vec<PathBuf>,
        normalizer: &Normalizer,
    ) -> Vec<(PathBuf, Result<Feed>)> {
        let mut handles = Vec::new();

        for path in paths {
            let loader = self.loader.clone();
            let semaphore = self.semaphore.clone();
            let normalizer = normalizer.clone();

            let handle = tokio::spawn(async move {
                let result = normalize_single(&loader, &semaphore, &path, &normalizer).await;
                (path, result)
            });

            handles.push(handle);
        }

        let mut results = Vec::new();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        results
    }
}

async fn normalize_single(
    loader: &Arc<dyn Loader + Send + Sync>,
    semaphore: &Semaphore,
    path: &Path,
    normalizer: &Normalizer,
) -> Result<Feed> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|e| FeedloomError::Other(e.to_string()))?;

    let body = loader.load(path).await?;
    let feed = normalizer.normalize(&body)?;
    tracing::info!(
        "Normalized {} entries from {}",
        feed.entries.len(),
        path.display()
    );

    Ok(feed)
}

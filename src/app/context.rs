use std::sync::Arc;

use crate::config::Config;
use crate::loader::{FileLoader, Loader, ParallelNormalizer};
use crate::normalizer::Normalizer;

pub struct AppContext {
    pub config: Config,
    pub loader: Arc<dyn Loader + Send + Sync>,
    pub batch: ParallelNormalizer,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let loader: Arc<dyn Loader + Send + Sync> = Arc::new(FileLoader::new());
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: Config, loader: Arc<dyn Loader + Send + Sync>) -> Self {
        let batch = ParallelNormalizer::with_workers(loader.clone(), config.batch.workers);
        let normalizer = Normalizer::new(config.parse.mode);

        Self {
            config,
            loader,
            batch,
            normalizer,
        }
    }
}

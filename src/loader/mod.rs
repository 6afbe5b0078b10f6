pub mod file_loader;
pub mod parallel;

use std::path::Path;

use async_trait::async_trait;

use crate::app::Result;

pub use file_loader::FileLoader;
pub use parallel::{ParallelNormalizer, DEFAULT_WORKERS};

/// Source of raw feed documents.
#[async_trait]
pub trait Loader {
    async fn load(&self, path: &Path) -> Result<Vec<u8>>;
}

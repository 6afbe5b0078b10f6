use std::path::Path;

use async_trait::async_trait;

use crate::app::Result;
use crate::loader::Loader;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn load(&self, path: &Path) -> Result<Vec<u8>> {
        let body = tokio::fs::read(path).await?;
        tracing::debug!("Loaded {} bytes from {}", body.len(), path.display());
        Ok(body)
    }
}

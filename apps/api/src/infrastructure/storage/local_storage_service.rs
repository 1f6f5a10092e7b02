use super::traits::StorageService;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores media on the local filesystem. Files are served back under
/// `/uploads` by the HTTP layer, which also answers range requests.
pub struct LocalStorageService {
    root: PathBuf,
    public_base: String,
}

impl LocalStorageService {
    pub async fn new(root: impl Into<PathBuf>, public_base: &str) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload directory {}", root.display()))?;
        Ok(Self {
            root,
            public_base: public_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || key.is_empty() {
            anyhow::bail!("Invalid storage key '{}'", key);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> anyhow::Result<String> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(self.get_url(key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_url(&self, key: &str) -> String {
        format!("{}/uploads/{}", self.public_base, key)
    }
}

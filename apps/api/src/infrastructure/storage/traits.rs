use async_trait::async_trait;

/// Blob storage for uploaded media. `upload` returns the public URL of the
/// stored object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> anyhow::Result<String>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
    fn get_url(&self, key: &str) -> String;
}

use super::traits::StorageService;
use async_trait::async_trait;
use aws_sdk_s3::{
    Client, config::BehaviorVersion, config::Credentials, config::Region, primitives::ByteStream,
};

/// Settings for an S3-compatible bucket (AWS, R2, MinIO).
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub region: String,
    pub force_path_style: bool,
    pub bucket: String,
    pub public_url: String,
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    public_url: String,
}

impl S3StorageService {
    pub fn new(settings: S3Settings) -> Self {
        let creds = Credentials::new(
            settings.access_key_id,
            settings.secret_access_key,
            None,
            None,
            "travelog",
        );
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(creds)
            .endpoint_url(settings.endpoint)
            .region(Region::new(settings.region))
            .force_path_style(settings.force_path_style)
            .build();
        Self {
            client: Client::from_conf(config),
            bucket: settings.bucket,
            public_url: settings.public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> anyhow::Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .cache_control("public, max-age=31536000, immutable")
            .send()
            .await?;
        tracing::debug!(bucket = %self.bucket, key, "Stored object");
        Ok(self.get_url(key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    fn get_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}

//! S3-compatible object-store gateway.

use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::info;

use sharebox_core::config::StorageConfig;
use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;

/// Gateway over an S3-compatible object store.
///
/// Constructed once at startup and injected into services; nothing in the
/// application talks to the SDK client directly.
#[derive(Debug, Clone)]
pub struct StorageGateway {
    client: Client,
    bucket: String,
    presign_ttl: Duration,
}

impl StorageGateway {
    /// Build an SDK client from configuration and wrap it.
    ///
    /// Path-style addressing is forced so MinIO-style endpoints work
    /// without virtual-host DNS.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            region = %config.region,
            "Initializing object storage"
        );

        let base_config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(aws_config::Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .load()
            .await;

        let s3_config = S3ConfigBuilder::from(&base_config)
            .force_path_style(true)
            .build();

        let gateway = Self::from_client(
            Client::from_conf(s3_config),
            config.bucket.clone(),
            Duration::from_secs(config.presign_ttl_seconds),
        );
        gateway.ensure_bucket().await?;
        Ok(gateway)
    }

    /// Wrap an already-constructed SDK client. Used by tests and by
    /// callers that manage client construction themselves.
    pub fn from_client(client: Client, bucket: String, presign_ttl: Duration) -> Self {
        Self {
            client,
            bucket,
            presign_ttl,
        }
    }

    /// Create the bucket if it does not already exist.
    pub async fn ensure_bucket(&self) -> AppResult<()> {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            info!(bucket = %self.bucket, "Creating bucket");
            self.client
                .create_bucket()
                .bucket(&self.bucket)
                .send()
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create bucket '{}'", self.bucket),
                        e,
                    )
                })?;
        }
        Ok(())
    }

    /// Store an object under the given key.
    pub async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to store object '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    /// Delete an object.
    pub async fn delete_object(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    /// Mint a time-limited presigned GET URL for an object.
    ///
    /// Content-Disposition is pinned to `attachment` with the original
    /// file name so browsers download rather than render.
    pub async fn presign_download(&self, key: &str, file_name: &str) -> AppResult<String> {
        let presign_config = PresigningConfig::expires_in(self.presign_ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presign expiry", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(format!("attachment; filename=\"{file_name}\""))
            .presigned(presign_config)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign object '{key}'"),
                    e,
                )
            })?;

        Ok(request.uri().to_string())
    }
}

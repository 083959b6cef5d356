//! S3-backed image storage

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::instrument;
use uuid::Uuid;

use axum_helpers::ErrorCode;
use core_config::s3::S3Config;

use crate::error::{CatalogError, CatalogResult};
use crate::models::ImageUpload;
use crate::upload::ImageStore;

/// [`ImageStore`] backed by an S3 bucket.
///
/// Credentials come from standard AWS SDK resolution (environment, shared
/// files, instance profile); only the bucket, public base URL and optional
/// region override come from [`S3Config`].
#[derive(Clone)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStore {
    /// Create a store from the ambient AWS environment
    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config), &config.bucket, &config.public_base_url)
    }

    /// Create a store from an existing client
    pub fn new(client: Client, bucket: &str, public_base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Object key for an upload: a fresh v7 uuid plus the sanitized original
    /// file name, under the `products/` prefix.
    fn object_key(file_name: &str) -> String {
        let sanitized: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        format!("products/{}-{}", Uuid::now_v7(), sanitized)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: ImageUpload) -> CatalogResult<String> {
        let key = Self::object_key(&file.file_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&file.content_type)
            .body(ByteStream::from(file.bytes))
            .send()
            .await
            .map_err(|err| {
                tracing::error!(
                    error_code = ErrorCode::StorageError.code(),
                    error = %err,
                    "S3 upload failed"
                );
                CatalogError::Storage(err.to_string())
            })?;

        tracing::info!(%key, "Image uploaded");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_sanitizes_file_name() {
        let key = S3ImageStore::object_key("my photo (1).png");

        assert!(key.starts_with("products/"));
        assert!(key.ends_with("-my-photo--1-.png"));
        assert!(!key.contains(' '));
        assert!(!key.contains('('));
    }

    #[test]
    fn test_object_key_is_unique_per_call() {
        let first = S3ImageStore::object_key("shirt.png");
        let second = S3ImageStore::object_key("shirt.png");

        assert_ne!(first, second);
    }
}

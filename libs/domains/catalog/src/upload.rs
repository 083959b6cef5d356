use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::ImageUpload;

/// Storage collaborator for product images.
///
/// The create pipeline calls this exactly once, after every form field has
/// validated. A failure surfaces as a 500 with the storage message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the file and return the public URL it will be served from
    async fn upload(&self, file: ImageUpload) -> CatalogResult<String>;
}

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId};

use crate::error::CatalogResult;
use crate::models::{Product, ProductUpdate};
use crate::query::ProductQuery;

/// Repository trait for product persistence.
///
/// The service layer depends only on this interface; implementations can
/// use different storage backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product document
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    /// Find a product by its normalized title. Soft-deleted documents are
    /// included: titles stay reserved after deletion.
    async fn find_by_title(&self, title: &str) -> CatalogResult<Option<Product>>;

    /// Find a product by id, excluding soft-deleted documents
    async fn find_active(&self, id: ObjectId) -> CatalogResult<Option<Product>>;

    /// List active products matching the query, in its sort order
    async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>>;

    /// Apply validated field changes as a partial update and bump
    /// `updatedAt`
    async fn apply_patch(&self, id: ObjectId, update: &ProductUpdate) -> CatalogResult<()>;

    /// Mark an active product as deleted at the given time
    async fn soft_delete(&self, id: ObjectId, deleted_at: bson::DateTime) -> CatalogResult<()>;
}

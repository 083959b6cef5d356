//! MongoDB implementation of the product repository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use tracing::instrument;

use axum_helpers::ErrorCode;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductUpdate};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;

/// MongoDB implementation of the [`ProductRepository`]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a repository over the default `products` collection
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes.
    ///
    /// The unique title index is not sparse and not partial: it spans
    /// soft-deleted documents, which is what keeps deleted titles reserved.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_title_unique".to_string())
                        .build(),
                )
                .build(),
            // Supports the listing filters and price sort
            IndexModel::builder()
                .keys(doc! { "isDeleted": 1, "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_active_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Map a write failure to the duplicate-title error when the unique
    /// title index rejected it; anything else stays a database error.
    fn map_write_error(err: mongodb::error::Error) -> CatalogError {
        if is_duplicate_key(&err) {
            tracing::warn!(
                error_code = ErrorCode::DuplicateKey.code(),
                "Unique title index rejected write"
            );
            CatalogError::DuplicateTitle
        } else {
            CatalogError::from(err)
        }
    }

    /// Render validated field changes as the `$set` payload. Always bumps
    /// `updatedAt`.
    fn build_update(update: &ProductUpdate) -> Document {
        let mut set = Document::new();

        if let Some(title) = &update.title {
            set.insert("title", title);
        }
        if let Some(description) = &update.description {
            set.insert("description", description);
        }
        if let Some(price) = update.price {
            set.insert("price", price);
        }
        if let Some(currency_id) = &update.currency_id {
            set.insert("currencyId", currency_id);
        }
        if let Some(currency_format) = &update.currency_format {
            set.insert("currencyFormat", currency_format);
        }
        if let Some(is_free_shipping) = update.is_free_shipping {
            set.insert("isFreeShipping", is_free_shipping);
        }
        if let Some(style) = &update.style {
            set.insert("style", style);
        }
        if let Some(sizes) = &update.available_sizes {
            let codes: Vec<String> = sizes.iter().map(|size| size.to_string()).collect();
            set.insert("availableSizes", codes);
        }
        if let Some(installments) = update.installments {
            set.insert("installments", installments);
        }

        set.insert("updatedAt", bson::DateTime::now());
        set
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(title = %product.title))]
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        self.collection
            .insert_one(&product)
            .await
            .map_err(Self::map_write_error)?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_title(&self, title: &str) -> CatalogResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "title": title }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_active(&self, id: ObjectId) -> CatalogResult<Option<Product>> {
        let product = self
            .collection
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await?;
        Ok(product)
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        let options = FindOptions::builder().sort(query.sort_document()).build();

        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, update))]
    async fn apply_patch(&self, id: ObjectId, update: &ProductUpdate) -> CatalogResult<()> {
        let changes = Self::build_update(update);

        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await
            .map_err(Self::map_write_error)?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: ObjectId, deleted_at: bson::DateTime) -> CatalogResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": {
                    "isDeleted": true,
                    "deletedAt": deleted_at,
                    "updatedAt": bson::DateTime::now(),
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(product_id = %id, "Product soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Size;

    #[test]
    fn test_build_update_empty_only_bumps_updated_at() {
        let set = MongoProductRepository::build_update(&ProductUpdate::default());

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }

    #[test]
    fn test_build_update_renders_set_fields() {
        let update = ProductUpdate {
            title: Some("blue shirt".to_string()),
            price: Some(30.0),
            is_free_shipping: Some(true),
            ..Default::default()
        };

        let set = MongoProductRepository::build_update(&update);

        assert_eq!(set.get_str("title").unwrap(), "blue shirt");
        assert_eq!(set.get_f64("price").unwrap(), 30.0);
        assert!(set.get_bool("isFreeShipping").unwrap());
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("description"));
    }

    #[test]
    fn test_build_update_renders_sizes_as_codes() {
        let update = ProductUpdate {
            available_sizes: Some(vec![Size::XS, Size::XXL]),
            ..Default::default()
        };

        let set = MongoProductRepository::build_update(&update);
        let sizes = set.get_array("availableSizes").unwrap();

        let codes: Vec<&str> = sizes.iter().filter_map(|value| value.as_str()).collect();
        assert_eq!(codes, vec!["XS", "XXL"]);
    }
}

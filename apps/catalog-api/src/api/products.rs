//! Products API routes
//!
//! Wires the catalog domain to MongoDB persistence and S3 image storage.

use crate::state::AppState;
use axum::Router;
use domain_catalog::{MongoProductRepository, ProductService};
use tracing::info;

/// Create the products router backed by MongoDB and S3
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository, state.images.clone());

    domain_catalog::handlers::router(service)
}

/// Initialize product indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    info!("Product collection indexes created");
    Ok(())
}

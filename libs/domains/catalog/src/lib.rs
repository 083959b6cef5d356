//! Catalog Domain
//!
//! This module provides a complete domain implementation for a product
//! catalog backed by MongoDB, with product images stored in S3.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart, query filters, JSON)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation pipelines, business rules
//! └──┬──────┬───┘
//!    │      │
//!    │   ┌──▼─────────┐
//!    │   │ ImageStore │  ← Object storage (trait + S3 implementation)
//!    │   └────────────┘
//! ┌──▼──────────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::{FromEnv, s3::S3Config};
//! use domain_catalog::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     s3::S3ImageStore,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! // Create the repository, image store and service
//! let repository = MongoProductRepository::new(&db);
//! let images = S3ImageStore::from_config(&S3Config::from_env()?).await;
//! let service = ProductService::new(repository, images);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod s3;
pub mod service;
pub mod upload;
pub mod validation;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProductForm, ImageUpload, Product, ProductPatch, ProductResponse, ProductUpdate, Size,
};
pub use mongodb::MongoProductRepository;
pub use query::{PriceSort, ProductQuery};
pub use repository::ProductRepository;
pub use s3::S3ImageStore;
pub use service::ProductService;
pub use upload::ImageStore;

//! Database library providing the MongoDB connector and shared utilities
//!
//! This library provides a unified interface for connecting to and managing
//! database connections, with retry and health-check support.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::mongodb;
//!
//! let config = mongodb::MongoConfig::new("mongodb://localhost:27017", "catalog");
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! let collection = db.collection::<Document>("products");
//! ```

// Always available modules
pub mod common;

// Database-specific modules (conditional based on features)
#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};

//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod api_json;
pub mod object_id_path;

pub use api_json::ApiJson;
pub use object_id_path::ObjectIdPath;

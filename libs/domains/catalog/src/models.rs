use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Size codes a product can be offered in.
///
/// Membership is exact: `"s"` and `" M"` are not sizes. Form input is
/// upper-cased before parsing; query-string input is matched as-is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Size {
    S,
    XS,
    M,
    X,
    L,
    XXL,
    XL,
}

/// Product entity - the document stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Normalized title (single-spaced, lowercased); unique across the
    /// collection, soft-deleted documents included
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency_id: String,
    pub currency_format: String,
    pub is_free_shipping: bool,
    /// Public URL returned by the image store
    pub product_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub available_sizes: Vec<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<f64>,
    /// Soft-delete flag; reads exclude deleted documents
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Validated input for creating a product.
///
/// Produced by the service's create pipeline: text is already normalized,
/// numbers parsed, sizes resolved and the image uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency_id: String,
    pub currency_format: String,
    pub is_free_shipping: bool,
    pub product_image: String,
    pub style: Option<String>,
    pub available_sizes: Vec<Size>,
    pub installments: Option<f64>,
}

impl Product {
    /// Create a new product document from validated input
    pub fn new(draft: ProductDraft) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            currency_id: draft.currency_id,
            currency_format: draft.currency_format,
            is_free_shipping: draft.is_free_shipping,
            product_image: draft.product_image,
            style: draft.style,
            available_sizes: draft.available_sizes,
            installments: draft.installments,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Product as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Hex-encoded document id
    #[schema(example = "64f1c0a2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency_id: String,
    pub currency_format: String,
    pub is_free_shipping: bool,
    pub product_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub available_sizes: Vec<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<f64>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            title: product.title,
            description: product.description,
            price: product.price,
            currency_id: product.currency_id,
            currency_format: product.currency_format,
            is_free_shipping: product.is_free_shipping,
            product_image: product.product_image,
            style: product.style,
            available_sizes: product.available_sizes,
            installments: product.installments,
            is_deleted: product.is_deleted,
            created_at: to_chrono(product.created_at),
            updated_at: to_chrono(product.updated_at),
        }
    }
}

fn to_chrono(datetime: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(datetime.timestamp_millis()).unwrap_or_default()
}

/// An image file captured from a multipart field
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw multipart form fields for product creation, prior to validation.
///
/// Every text value arrives as a string; parsing and normalization happen
/// in the service's create pipeline.
#[derive(Debug, Default)]
pub struct CreateProductForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub currency_id: Option<String>,
    pub currency_format: Option<String>,
    pub is_free_shipping: Option<String>,
    pub style: Option<String>,
    pub available_sizes: Option<String>,
    pub installments: Option<String>,
    /// First file part of the form, if any
    pub image: Option<ImageUpload>,
    /// Number of text fields received, recognized or not; drives the
    /// empty-body check
    pub field_count: usize,
}

/// Partial update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency_id: Option<String>,
    pub currency_format: Option<String>,
    pub is_free_shipping: Option<bool>,
    pub style: Option<String>,
    pub available_sizes: Option<Vec<String>>,
    pub installments: Option<f64>,
}

impl ProductPatch {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.currency_id.is_none()
            && self.currency_format.is_none()
            && self.is_free_shipping.is_none()
            && self.style.is_none()
            && self.available_sizes.is_none()
            && self.installments.is_none()
    }
}

/// Validated field changes produced by the update pipeline, ready to be
/// rendered as a partial `$set`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency_id: Option<String>,
    pub currency_format: Option<String>,
    pub is_free_shipping: Option<bool>,
    pub style: Option<String>,
    pub available_sizes: Option<Vec<Size>>,
    pub installments: Option<f64>,
}

impl ProductUpdate {
    /// True when no change survived validation
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.currency_id.is_none()
            && self.currency_format.is_none()
            && self.is_free_shipping.is_none()
            && self.style.is_none()
            && self.available_sizes.is_none()
            && self.installments.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_draft() -> ProductDraft {
        ProductDraft {
            title: "red shirt".to_string(),
            description: "a comfy shirt".to_string(),
            price: 25.5,
            currency_id: "INR".to_string(),
            currency_format: "₹".to_string(),
            is_free_shipping: false,
            product_image: "https://cdn.test/products/red-shirt.png".to_string(),
            style: None,
            available_sizes: vec![Size::S, Size::M],
            installments: None,
        }
    }

    #[test]
    fn test_size_parses_exact_codes_only() {
        assert_eq!(Size::from_str("XL").unwrap(), Size::XL);
        assert!(Size::from_str("xl").is_err());
        assert!(Size::from_str(" M").is_err());
        assert!(Size::from_str("XXXL").is_err());
    }

    #[test]
    fn test_size_round_trips_through_display() {
        for size in [Size::S, Size::XS, Size::M, Size::X, Size::L, Size::XXL, Size::XL] {
            assert_eq!(Size::from_str(&size.to_string()).unwrap(), size);
        }
    }

    #[test]
    fn test_new_product_starts_active() {
        let product = Product::new(sample_draft());

        assert!(!product.is_deleted);
        assert!(product.deleted_at.is_none());
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_response_hex_encodes_id() {
        let product = Product::new(sample_draft());
        let hex = product.id.to_hex();

        let response = ProductResponse::from(product);
        assert_eq!(response.id, hex);
        assert_eq!(response.id.len(), 24);
    }

    #[test]
    fn test_response_converts_timestamps() {
        let product = Product::new(sample_draft());
        let millis = product.created_at.timestamp_millis();

        let response = ProductResponse::from(product);
        assert_eq!(response.created_at.timestamp_millis(), millis);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            price: Some(10.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(ProductUpdate::default().is_empty());

        let update = ProductUpdate {
            title: Some("blue shirt".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_product_document_uses_camel_case_keys() {
        let product = Product::new(sample_draft());
        let document = mongodb::bson::to_document(&product).unwrap();

        assert!(document.contains_key("_id"));
        assert!(document.contains_key("currencyId"));
        assert!(document.contains_key("isFreeShipping"));
        assert!(document.contains_key("availableSizes"));
        assert!(document.contains_key("isDeleted"));
        assert!(!document.contains_key("style"));
        assert!(!document.contains_key("deletedAt"));
    }
}

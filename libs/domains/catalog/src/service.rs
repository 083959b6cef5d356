//! Catalog business logic

use mongodb::bson::{self, oid::ObjectId};
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProductForm, Product, ProductDraft, ProductPatch, ProductUpdate, Size};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::upload::ImageStore;
use crate::validation::{
    is_alphabetic, is_valid_string, normalize_text, parse_boolean, parse_number, parse_sizes,
};

/// Currency assigned when the form omits `currencyId`
const DEFAULT_CURRENCY_ID: &str = "INR";
/// Currency symbol assigned when the form omits `currencyFormat`
const DEFAULT_CURRENCY_FORMAT: &str = "₹";

/// Orchestrates validation, image upload and persistence for products.
///
/// The create and update pipelines validate every field in a fixed order
/// with the first failure winning, and produce **no side effect** (no
/// upload, no write) until the whole payload has passed.
pub struct ProductService<R: ProductRepository, S: ImageStore> {
    repository: Arc<R>,
    images: Arc<S>,
}

impl<R: ProductRepository, S: ImageStore> ProductService<R, S> {
    /// Create a new service over the given collaborators
    pub fn new(repository: R, images: S) -> Self {
        Self {
            repository: Arc::new(repository),
            images: Arc::new(images),
        }
    }

    /// Run the create pipeline: validate the multipart form field by field,
    /// then upload the image, then insert.
    #[instrument(skip(self, form))]
    pub async fn create_product(&self, form: CreateProductForm) -> CatalogResult<Product> {
        if form.field_count == 0 {
            return Err(CatalogError::Validation(
                "Request body must not be empty".to_string(),
            ));
        }

        let title = normalize_text(&required_text(&form.title, "title")?);
        if self.repository.find_by_title(&title).await?.is_some() {
            return Err(CatalogError::DuplicateTitle);
        }

        let description = normalize_text(&required_text(&form.description, "description")?);

        let price = match &form.price {
            Some(raw) if !raw.is_empty() => parse_number(raw).ok_or_else(|| {
                CatalogError::Validation("price must be a number".to_string())
            })?,
            _ => return Err(CatalogError::Validation("price is required".to_string())),
        };

        let currency_id = match &form.currency_id {
            Some(raw) if !raw.is_empty() => {
                if !is_valid_string(raw) {
                    return Err(CatalogError::Validation(
                        "currencyId must not be blank".to_string(),
                    ));
                }
                if raw.as_str() != DEFAULT_CURRENCY_ID {
                    return Err(CatalogError::Validation(
                        "currencyId must be INR".to_string(),
                    ));
                }
                raw.clone()
            }
            _ => DEFAULT_CURRENCY_ID.to_string(),
        };

        let currency_format = match &form.currency_format {
            Some(raw) if !raw.is_empty() => {
                if !is_valid_string(raw) {
                    return Err(CatalogError::Validation(
                        "currencyFormat must not be blank".to_string(),
                    ));
                }
                if !raw.contains(DEFAULT_CURRENCY_FORMAT) {
                    return Err(CatalogError::Validation(
                        "currencyFormat must contain the ₹ symbol".to_string(),
                    ));
                }
                raw.clone()
            }
            _ => DEFAULT_CURRENCY_FORMAT.to_string(),
        };

        let is_free_shipping = match &form.is_free_shipping {
            Some(raw) if !raw.is_empty() => parse_boolean(raw).ok_or_else(|| {
                CatalogError::Validation(
                    "isFreeShipping must be either true or false".to_string(),
                )
            })?,
            _ => false,
        };

        let image = form.image.ok_or_else(|| {
            CatalogError::Validation("productImage file is required".to_string())
        })?;

        let style = match &form.style {
            Some(raw) if !raw.is_empty() => {
                if !is_alphabetic(raw) {
                    return Err(CatalogError::Validation(
                        "style must contain letters and spaces only".to_string(),
                    ));
                }
                Some(raw.clone())
            }
            _ => None,
        };

        let available_sizes = match &form.available_sizes {
            Some(raw) if !raw.is_empty() => parse_sizes(raw).ok_or_else(|| {
                CatalogError::Validation(
                    "availableSizes must be a comma-separated list of S, XS, M, X, L, XXL, XL"
                        .to_string(),
                )
            })?,
            _ => {
                return Err(CatalogError::Validation(
                    "availableSizes is required".to_string(),
                ))
            }
        };

        let installments = match &form.installments {
            Some(raw) if !raw.is_empty() => Some(parse_number(raw).ok_or_else(|| {
                CatalogError::Validation("installments must be a number".to_string())
            })?),
            _ => None,
        };

        // Every check passed; side effects start here
        let product_image = self.images.upload(image).await?;

        let product = Product::new(ProductDraft {
            title,
            description,
            price,
            currency_id,
            currency_format,
            is_free_shipping,
            product_image,
            style,
            available_sizes,
            installments,
        });

        self.repository.insert(product).await
    }

    /// Fetch a single active product
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> CatalogResult<Product> {
        self.repository
            .find_active(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// List every active product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository.list(&ProductQuery::new()).await
    }

    /// List active products matching a filtered query. Zero matches is an
    /// error here, unlike the unfiltered listing.
    #[instrument(skip(self, query))]
    pub async fn search_products(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        let products = self.repository.list(query).await?;
        if products.is_empty() {
            return Err(CatalogError::NoMatches);
        }
        Ok(products)
    }

    /// Run the update pipeline: validate the patch field by field with the
    /// same rules as create, then apply it as a partial update.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: ObjectId,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        if patch.is_empty() {
            return Err(CatalogError::Validation(
                "At least one updatable field must be provided".to_string(),
            ));
        }

        let existing = self
            .repository
            .find_active(id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let mut update = ProductUpdate::default();

        if let Some(raw) = &patch.title {
            if !is_valid_string(raw) {
                return Err(CatalogError::Validation(
                    "title must not be blank".to_string(),
                ));
            }
            let title = normalize_text(raw);
            // Uniqueness is only re-checked when the title actually changes
            if title != existing.title {
                if self.repository.find_by_title(&title).await?.is_some() {
                    return Err(CatalogError::DuplicateTitle);
                }
                update.title = Some(title);
            }
        }

        if let Some(raw) = &patch.description {
            if !is_valid_string(raw) {
                return Err(CatalogError::Validation(
                    "description must not be blank".to_string(),
                ));
            }
            update.description = Some(normalize_text(raw));
        }

        if let Some(price) = patch.price {
            update.price = Some(price);
        }

        if let Some(raw) = &patch.currency_id {
            if !is_valid_string(raw) {
                return Err(CatalogError::Validation(
                    "currencyId must not be blank".to_string(),
                ));
            }
            if raw.as_str() != DEFAULT_CURRENCY_ID {
                return Err(CatalogError::Validation(
                    "currencyId must be INR".to_string(),
                ));
            }
            update.currency_id = Some(raw.clone());
        }

        if let Some(raw) = &patch.currency_format {
            if !is_valid_string(raw) {
                return Err(CatalogError::Validation(
                    "currencyFormat must not be blank".to_string(),
                ));
            }
            if !raw.contains(DEFAULT_CURRENCY_FORMAT) {
                return Err(CatalogError::Validation(
                    "currencyFormat must contain the ₹ symbol".to_string(),
                ));
            }
            update.currency_format = Some(raw.clone());
        }

        if let Some(is_free_shipping) = patch.is_free_shipping {
            update.is_free_shipping = Some(is_free_shipping);
        }

        if let Some(raw) = &patch.style {
            if !is_alphabetic(raw) {
                return Err(CatalogError::Validation(
                    "style must contain letters and spaces only".to_string(),
                ));
            }
            update.style = Some(raw.clone());
        }

        if let Some(raw_sizes) = &patch.available_sizes {
            if raw_sizes.is_empty() {
                return Err(CatalogError::Validation(
                    "availableSizes must not be empty".to_string(),
                ));
            }
            let sizes = raw_sizes
                .iter()
                .map(|token| Size::from_str(&token.to_uppercase()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| {
                    CatalogError::Validation(
                        "availableSizes must only contain S, XS, M, X, L, XXL, XL".to_string(),
                    )
                })?;
            update.available_sizes = Some(sizes);
        }

        if let Some(installments) = patch.installments {
            update.installments = Some(installments);
        }

        // A patch that only restates the current title changes nothing
        if update.is_empty() {
            return Ok(existing);
        }

        self.repository.apply_patch(id, &update).await?;

        self.repository
            .find_active(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// Soft-delete an active product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> CatalogResult<()> {
        self.repository
            .find_active(id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        self.repository
            .soft_delete(id, bson::DateTime::now())
            .await
    }
}

/// Required text field: absent or empty is the "required" failure, present
/// but whitespace-only is the "blank" failure.
fn required_text(value: &Option<String>, field: &str) -> CatalogResult<String> {
    match value {
        Some(raw) if !raw.is_empty() => {
            if is_valid_string(raw) {
                Ok(raw.clone())
            } else {
                Err(CatalogError::Validation(format!(
                    "{field} must not be blank"
                )))
            }
        }
        _ => Err(CatalogError::Validation(format!("{field} is required"))),
    }
}

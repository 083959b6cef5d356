//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::{Multipart, Query, State, multipart::MultipartError},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiJson, ApiResponse, ObjectIdPath,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProductForm, ImageUpload, ProductPatch, ProductResponse, Size};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::upload::ImageStore;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse,
            ProductPatch,
            Size,
            CreateProductRequest,
            ApiResponse<ProductResponse>,
            ApiResponse<Vec<ProductResponse>>
        ),
        responses(
            BadRequestResponse,
            BadRequestObjectIdResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R, S>(service: ProductService<R, S>) -> Router
where
    R: ProductRepository + 'static,
    S: ImageStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Multipart form accepted by the create endpoint.
///
/// This type only drives the OpenAPI document. The handler reads the parts
/// manually so that validation can run field by field in a fixed order.
#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product title, unique across the catalog after normalization
    pub title: String,
    /// Product description
    pub description: String,
    /// Price in rupees, sent as a decimal string
    pub price: String,
    /// Must be `INR` when present; defaults to `INR`
    pub currency_id: Option<String>,
    /// Must contain the `₹` symbol when present; defaults to `₹`
    pub currency_format: Option<String>,
    /// `true` or `false`; defaults to `false`
    pub is_free_shipping: Option<String>,
    /// Letters and spaces only
    pub style: Option<String>,
    /// Comma-separated size codes, e.g. `s,m,xl` (case-insensitive)
    pub available_sizes: String,
    /// Number of installments
    pub installments: Option<String>,
    /// Product image file
    #[schema(value_type = String, format = Binary)]
    pub product_image: String,
}

fn invalid_multipart(err: MultipartError) -> CatalogError {
    CatalogError::Validation(format!("Invalid multipart form data: {}", err))
}

/// Drain the multipart stream into a [`CreateProductForm`].
///
/// Text parts land in their named slot; the first file part becomes the
/// product image regardless of its field name, and further file parts are
/// ignored. Unknown text fields still count toward the non-empty-body check.
async fn collect_form(multipart: &mut Multipart) -> CatalogResult<CreateProductForm> {
    let mut form = CreateProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            if form.image.is_none() {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field.bytes().await.map_err(invalid_multipart)?.to_vec();
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(invalid_multipart)?;
        form.field_count += 1;

        match name.as_str() {
            "title" => form.title = Some(value),
            "description" => form.description = Some(value),
            "price" => form.price = Some(value),
            "currencyId" => form.currency_id = Some(value),
            "currencyFormat" => form.currency_format = Some(value),
            "isFreeShipping" => form.is_free_shipping = Some(value),
            "style" => form.style = Some(value),
            "availableSizes" => form.available_sizes = Some(value),
            "installments" => form.installments = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// List products, filtered when query parameters are present
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(
        ("size" = Option<String>, Query, description = "Comma-separated size codes, e.g. `S,M,XL`"),
        ("name" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("priceGreaterThan" = Option<f64>, Query, description = "Strict lower price bound"),
        ("priceLessThan" = Option<f64>, Query, description = "Strict upper price bound"),
        ("priceSort" = Option<String>, Query, description = "`1` for ascending, `-1` for descending price")
    ),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, S: ImageStore>(
    State(service): State<Arc<ProductService<R, S>>>,
    Query(params): Query<HashMap<String, String>>,
) -> CatalogResult<Json<ApiResponse<Vec<ProductResponse>>>> {
    let (products, message) = if params.is_empty() {
        let products = service.list_products().await?;
        let message = format!("Found {} items", products.len());
        (products, message)
    } else {
        let query = ProductQuery::from_params(&params)?;
        let products = service.search_products(&query).await?;
        let message = format!("{} matches found", products.len());
        (products, message)
    };

    let items: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(ApiResponse::ok(message, items)))
}

/// Create a new product from a multipart form
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = CreateProductRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, S: ImageStore>(
    State(service): State<Arc<ProductService<R, S>>>,
    mut multipart: Multipart,
) -> CatalogResult<impl IntoResponse> {
    let form = collect_form(&mut multipart).await?;
    let product = service.create_product(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Product created successfully",
            ProductResponse::from(product),
        )),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, S: ImageStore>(
    State(service): State<Arc<ProductService<R, S>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CatalogResult<Json<ApiResponse<ProductResponse>>> {
    let product = service.get_product(id).await?;

    Ok(Json(ApiResponse::ok(
        "Product found",
        ProductResponse::from(product),
    )))
}

/// Update any subset of a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, S: ImageStore>(
    State(service): State<Arc<ProductService<R, S>>>,
    ObjectIdPath(id): ObjectIdPath,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> CatalogResult<Json<ApiResponse<ProductResponse>>> {
    let product = service.update_product(id, patch).await?;

    Ok(Json(ApiResponse::ok(
        "Product updated successfully",
        ProductResponse::from(product),
    )))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, S: ImageStore>(
    State(service): State<Arc<ProductService<R, S>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CatalogResult<Json<ApiResponse<ProductResponse>>> {
    service.delete_product(id).await?;

    Ok(Json(ApiResponse::message("Product deleted successfully")))
}

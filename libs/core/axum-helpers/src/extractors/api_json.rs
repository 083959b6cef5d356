//! JSON extractor that renders rejections in the standard error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON extractor with envelope-shaped rejections.
///
/// Behaves like [`axum::Json`], but malformed bodies produce the same
/// `{"status": false, "message": ...}` envelope the rest of the API uses
/// instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::put;
/// use axum_helpers::extractors::ApiJson;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct UpdateProduct {
///     price: Option<f64>,
/// }
///
/// async fn update_product(ApiJson(payload): ApiJson<UpdateProduct>) -> String {
///     format!("price: {:?}", payload.price)
/// }
///
/// let app = Router::new().route("/products/{id}", put(update_product));
/// ```
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ApiJson(data))
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("A product with this title already exists")]
    DuplicateTitle,

    #[error("Product not found")]
    NotFound,

    #[error("No products matched the given filters")]
    NoMatches,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::DuplicateTitle => {
                AppError::BadRequest("A product with this title already exists".to_string())
            }
            CatalogError::NotFound => AppError::NotFound("Product not found".to_string()),
            CatalogError::NoMatches => {
                AppError::NotFound("No products matched the given filters".to_string())
            }
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
            CatalogError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        tracing::error!(
            error_code = ErrorCode::DatabaseError.code(),
            error = %err,
            "MongoDB operation failed"
        );
        CatalogError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: AppError = CatalogError::Validation("price must be a number".to_string()).into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "price must be a number"));
    }

    #[test]
    fn test_duplicate_title_maps_to_bad_request() {
        let err: AppError = CatalogError::DuplicateTitle.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_not_found_and_no_matches_map_to_not_found() {
        assert!(matches!(
            AppError::from(CatalogError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(CatalogError::NoMatches),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_infrastructure_errors_pass_message_through() {
        let err: AppError = CatalogError::Storage("bucket unreachable".to_string()).into();
        assert!(matches!(err, AppError::InternalServerError(msg) if msg == "bucket unreachable"));
    }
}

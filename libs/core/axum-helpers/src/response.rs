//! Response envelope shared by every API endpoint.
//!
//! All success payloads are wrapped in [`ApiResponse`]: a boolean outcome
//! flag, a human-readable message, and the payload itself under `data`.
//! Failure payloads use [`crate::errors::ErrorResponse`], which renders the
//! same envelope with `status: false` and no `data` key.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope.
///
/// `data` is skipped entirely when there is no payload, so message-only
/// responses serialize as `{"status": true, "message": "..."}`.
///
/// # Example
///
/// ```rust
/// use axum_helpers::response::ApiResponse;
///
/// let body = ApiResponse::ok("Product found", 42);
/// assert_eq!(
///     serde_json::to_string(&body).unwrap(),
///     r#"{"status":true,"message":"Product found","data":42}"#
/// );
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Outcome flag: `true` on success, `false` on failure.
    pub status: bool,
    /// Human-readable summary of the outcome.
    pub message: String,
    /// Payload, omitted when the endpoint has nothing to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success envelope without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_includes_data() {
        let body = ApiResponse::ok("Found 2 items", vec![1, 2]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], true);
        assert_eq!(json["message"], "Found 2 items");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_message_only_skips_data_key() {
        let body = ApiResponse::<String>::message("Product deleted successfully");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], true);
        assert!(json.get("data").is_none());
    }
}

//! HTTP status mapping for the core error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use anivise_core::error::AniviseError;

/// Wrapper turning [`AniviseError`] into an HTTP response.
///
/// 401 vs 403 is the one distinction clients get; infrastructure
/// faults become an opaque 500 so nothing internal leaks.
pub struct ApiError(pub AniviseError);

impl From<AniviseError> for ApiError {
    fn from(err: AniviseError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AniviseError::Unauthenticated | AniviseError::WebhookUnauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            AniviseError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden".to_string()),
            AniviseError::NotFound { .. } | AniviseError::WebhookResourceMismatch { .. } => {
                (StatusCode::NOT_FOUND, "not found".to_string())
            }
            AniviseError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AniviseError::Lookup(_)
            | AniviseError::Config(_)
            | AniviseError::Crypto(_)
            | AniviseError::Internal(_) => {
                error!(error = %self.0, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

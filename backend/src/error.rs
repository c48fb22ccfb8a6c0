use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error surface of the HTTP layer. Storage and domain code report
/// failures as `anyhow::Error`; handlers translate them into one of
/// these kinds at the boundary so callers never see a raw stack trace.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed required parameter; rejected before any store call
    #[error("{0}")]
    InvalidRequest(String),

    /// A single-row lookup matched nothing
    #[error("{0}")]
    NotFound(String),

    /// Webhook signature did not verify against the shared secret
    #[error("{0}")]
    Unauthorized(String),

    /// The record store or a third-party service failed; carries the
    /// combined diagnostic message
    #[error("{0}")]
    Upstream(String),

    /// Anything uncaught; logged server-side, generic message to the caller
    #[error("Internal Server Error")]
    Unhandled,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) | ApiError::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

use axum::http::StatusCode;

use crate::app::errors::ApiError;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any path no route matched.
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

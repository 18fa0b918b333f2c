//! API error type and JSON error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bloglist_auth::{PasswordError, TokenError};
use bloglist_core::DomainError;
use bloglist_infra::StoreError;

/// Every way a handler can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A path id that is not an id at all.
    #[error("malformatted id")]
    MalformattedId,

    /// A write targeted a record that does not exist.
    #[error("{0}")]
    MissingRecord(&'static str),

    /// No usable credentials, or the caller may not touch the record.
    #[error("{0}")]
    Unauthorized(String),

    /// A read targeted a record that does not exist. Answered without a body.
    #[error("not found")]
    NotFound,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    /// Anything unexpected: store down, hashing failure, panicked task.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidId(_) => Self::MalformattedId,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
            Self::MalformattedId => {
                json_error(StatusCode::BAD_REQUEST, "malformatted_id", "malformatted id")
            }
            Self::MissingRecord(msg) => json_error(StatusCode::BAD_REQUEST, "not_found", msg),
            Self::Unauthorized(msg) => json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::UnknownEndpoint => {
                json_error(StatusCode::NOT_FOUND, "unknown_endpoint", "unknown endpoint")
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "an internal error occurred",
                )
            }
        }
    }
}

/// `{ "error": <message>, "code": <code> }` with the given status.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}

/// Parse a path segment into a typed id.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse().map_err(|_| ApiError::MalformattedId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloglist_core::BlogId;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (ApiError::validation("x"), StatusCode::BAD_REQUEST),
            (ApiError::MalformattedId, StatusCode::BAD_REQUEST),
            (ApiError::MissingRecord("blog not found"), StatusCode::BAD_REQUEST),
            (ApiError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::UnknownEndpoint, StatusCode::NOT_FOUND),
            (
                ApiError::Internal(anyhow::anyhow!("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn domain_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(DomainError::validation("missing")),
            ApiError::Validation(msg) if msg == "missing"
        ));
        assert!(matches!(
            ApiError::from(DomainError::invalid_id("BlogId: bad")),
            ApiError::MalformattedId
        ));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id::<BlogId>(&BlogId::new().to_string()).is_ok());
        assert!(matches!(parse_id::<BlogId>("123"), Err(ApiError::MalformattedId)));
    }
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Exchange a username and password for a bearer token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> Result<Json<dto::LoginResponse>, ApiError> {
    let Json(body) = body?;
    Ok(Json(services.login(body).await?))
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/users", get(list_users).post(register_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<dto::UserResponse>>, ApiError> {
    Ok(Json(services.list_users().await?))
}

pub async fn register_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    let user = services.register(body).await?;
    Ok((StatusCode::CREATED, Json(dto::user_response(user, Vec::new()))))
}

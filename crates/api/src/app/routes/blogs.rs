use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use bloglist_core::BlogId;

use crate::app::errors::{parse_id, ApiError};
use crate::app::services::AppServices;
use crate::app::{dto, routes::require_caller};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/:id", get(get_blog).put(update_blog).delete(delete_blog))
}

pub async fn list_blogs(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<dto::BlogListItem>>, ApiError> {
    Ok(Json(services.list_blogs().await?))
}

pub async fn create_blog(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CurrentUser>>,
    body: Result<Json<dto::CreateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = require_caller(caller)?;
    let Json(body) = body?;

    let blog = services.create_blog(&caller, body).await?;
    Ok((StatusCode::CREATED, Json(dto::BlogResponse::from(blog))))
}

pub async fn get_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<dto::BlogResponse>, ApiError> {
    let id: BlogId = parse_id(&id)?;
    Ok(Json(services.get_blog(id).await?.into()))
}

/// Full replacement of a blog's fields. Open to anonymous callers.
pub async fn update_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: BlogId = parse_id(&id)?;
    let Json(body) = body?;

    let blog = services.update_blog(id, body).await?;
    Ok((StatusCode::CREATED, Json(dto::BlogResponse::from(blog))))
}

pub async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = require_caller(caller)?;
    let id: BlogId = parse_id(&id)?;

    services.delete_blog(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use bloglist_blogs::BlogStats;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/stats", get(blog_stats))
}

/// Aggregates over every stored blog; fields are `null` while there are none.
pub async fn blog_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<BlogStats>, ApiError> {
    Ok(Json(services.stats().await?))
}

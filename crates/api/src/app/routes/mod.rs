use axum::{Extension, Router};

use crate::app::errors::ApiError;
use crate::app::services::TOKEN_REQUIRED;
use crate::context::CurrentUser;

pub mod blogs;
pub mod login;
pub mod stats;
pub mod system;
pub mod users;

/// Router for every endpoint under `/api/v1`.
pub fn router() -> Router {
    Router::new()
        .merge(blogs::router())
        .merge(users::router())
        .merge(login::router())
        .merge(stats::router())
}

/// The caller resolved by the auth middleware, or 401 when there is none.
pub(crate) fn require_caller(caller: Option<Extension<CurrentUser>>) -> Result<CurrentUser, ApiError> {
    caller
        .map(|Extension(user)| user)
        .ok_or_else(|| ApiError::unauthorized(TOKEN_REQUIRED))
}

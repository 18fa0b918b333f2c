use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use bloglist_auth::JwtValidator;
use bloglist_infra::{Store, StoreError};

use crate::app::errors::ApiError;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub store: Arc<dyn Store>,
}

/// Resolve the bearer token, if any, to a [`CurrentUser`] request extension.
///
/// Bad, expired or orphaned tokens are not rejected here: routes that need a
/// caller check for the extension themselves, everything else stays public.
/// A store failure while resolving the subject aborts the request with a 500.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = extract_bearer(req.headers()) {
        if let Some(user) = resolve(&state, token).await? {
            req.extensions_mut().insert(user);
        }
    }

    Ok(next.run(req).await)
}

async fn resolve(state: &AuthState, token: &str) -> Result<Option<CurrentUser>, StoreError> {
    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            return Ok(None);
        }
    };

    let user = state.store.find_user(claims.sub).await?;
    if user.is_none() {
        tracing::debug!(user_id = %claims.sub, "token subject no longer exists");
    }
    Ok(user.as_ref().map(CurrentUser::from))
}

/// Pull the token out of `authorization: bearer <token>`.
///
/// The scheme is matched case-insensitively.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

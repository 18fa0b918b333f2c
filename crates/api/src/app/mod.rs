//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/token wiring and the operations behind each route
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{http::Request, routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use bloglist_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(AppServices::from_config(config).await?);
    Ok(router(services))
}

/// Router over already wired services.
pub fn router(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        jwt: services.jwt(),
        store: services.store(),
    };

    let api = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", api)
        .fallback(routes::system::unknown_endpoint)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        tracing::span!(
                            Level::INFO,
                            "http_request",
                            method = %request.method(),
                            path = %request.uri().path(),
                        )
                    }),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

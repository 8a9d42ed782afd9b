//! API routes and handlers

use axum::{http::header, http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod health;
mod registry;

pub use health::*;
pub use registry::IdQuery;

/// CORS preflight answers are cached by browsers for a day
const CORS_MAX_AGE_SECS: u64 = 86400;

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/detailed", get(health::health_check_detailed))
}

/// Registry endpoint mounted on `base_path`
pub fn registry_routes(base_path: &str) -> Router<AppState> {
    Router::new().route(base_path, registry::routes())
}

/// Cross-origin policy of the registry endpoint: open to any origin, no credentials
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(CORS_MAX_AGE_SECS))
}

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    let base_path = state.config.server.base_path.clone();

    Router::new()
        .merge(health_routes())
        .merge(registry_routes(&base_path))
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

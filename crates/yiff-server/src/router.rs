use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoints;
use crate::handler;

/// Build the axum router with all yiff endpoints.
///
/// Only `POST` is routed on `/diff`; other methods get `405`.
pub fn build_router(config: &ServerConfig) -> Router {
    Router::new()
        .route(endpoints::DIFF, post(handler::diff_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

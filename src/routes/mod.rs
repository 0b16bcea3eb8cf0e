//! HTTP route handlers and router assembly.
//!
//! - `health`: healthcheck, readiness, metrics and version endpoints
//! - `items`: create/read/update/delete for the item resource

pub mod health;
pub mod items;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;

/// Request bodies above this size are rejected before deserialization.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the full application router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(health::healthcheck))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/items", post(items::create_item))
        .route("/items/", post(items::create_item))
        .route(
            "/items/{id}",
            get(items::read_item).put(items::update_item).delete(items::delete_item),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit::rate_limit_middleware))
        .layer(from_fn(middleware::logging::log_request_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // CORS: permissive in debug builds for local development against a separate UI
    if cfg!(debug_assertions) {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

use crate::state::AppState;
use crate::types::HealthStatus;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Root healthcheck - lightweight, does not touch the database
pub async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy", message: "API is running" })
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP itemstore_items_created Items created\n# TYPE itemstore_items_created counter\nitemstore_items_created {}\n\
# HELP itemstore_items_read Items read\n# TYPE itemstore_items_read counter\nitemstore_items_read {}\n\
# HELP itemstore_items_updated Items updated\n# TYPE itemstore_items_updated counter\nitemstore_items_updated {}\n\
# HELP itemstore_items_deleted Items deleted\n# TYPE itemstore_items_deleted counter\nitemstore_items_deleted {}\n\
# HELP itemstore_not_found Item lookups that missed\n# TYPE itemstore_not_found counter\nitemstore_not_found {}\n\
# HELP itemstore_rate_limited Requests rejected by the rate limiter\n# TYPE itemstore_rate_limited counter\nitemstore_rate_limited {}\n\
# HELP itemstore_uptime_seconds Uptime seconds\n# TYPE itemstore_uptime_seconds gauge\nitemstore_uptime_seconds {}\n",
        m.items_created,
        m.items_read,
        m.items_updated,
        m.items_deleted,
        m.not_found,
        m.rate_limited,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}

//! Integration-style tests for the itemstore service.
//!
//! - **api_tests**: item endpoints through the full router and middleware stack
//! - **health_api_tests**: healthcheck, readiness, metrics and version endpoints
//! - **error_tests**: error mapping and response bodies
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: schema initialization and pool setup
//!
//! Shared setup lives in [`support`].

pub mod config_tests;
pub mod db_tests;

pub mod support {
    use axum::{body::Body, http::Response, Router};
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::config::AppConfig;
    use crate::state::AppState;
    use crate::{db, routes};

    /// In-memory database with the schema applied and a single connection.
    pub async fn test_pool() -> sqlx::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init_db(&pool).await.unwrap();
        pool
    }

    /// Router and state with rate limiting disabled.
    pub async fn test_app() -> (Router, AppState) {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        test_app_with(config).await
    }

    pub async fn test_app_with(config: AppConfig) -> (Router, AppState) {
        let state = AppState::new(test_pool().await, config);
        (routes::build_router(state.clone()), state)
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}

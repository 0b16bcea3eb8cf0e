use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::middleware::RateLimiter;

/// The shared application state.
///
/// Cloned into every handler and stateful middleware. The pool is created once
/// at startup and handed in here; handlers never open connections themselves
/// but check one out per request through [`crate::store::ItemStore`].
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Request counters exposed on `/metrics`.
    pub metrics: Metrics,
    /// Per-client rate limiter used by the rate limiting middleware.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Creates a new `AppState`, sizing the rate limiter from `config.rate_limit`.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let rate_limiter =
            RateLimiter::new(config.rate_limit.max_requests, config.rate_limit.window_seconds);

        Self { db, config: Arc::new(config), metrics: Metrics::new(), rate_limiter }
    }
}

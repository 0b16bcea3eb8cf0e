use super::ip::client_ip;
use axum::{
    extract::{connect_info::ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use crate::state::AppState;

/// A thread-safe per-client rate limiter based on the sliding window algorithm.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<IpAddr, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter`.
    ///
    /// # Arguments
    ///
    /// * `max_requests` - The maximum number of requests allowed within the time window.
    /// * `window_seconds` - The duration of the time window in seconds.
    pub fn new(max_requests: usize, window_seconds: u64) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Human readable form of the limit, e.g. `10 per 1 second`.
    pub fn describe(&self) -> String {
        let secs = self.window.as_secs();
        let unit = if secs == 1 { "second" } else { "seconds" };
        format!("{} per {} {}", self.max_requests, secs, unit)
    }

    /// Records a request from `ip` if it is within the limit.
    ///
    /// Returns `Err(retry_after)` without recording anything when the client
    /// has exhausted its window.
    pub async fn check_rate_limit(&self, ip: IpAddr) -> Result<(), Duration> {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        let timestamps = requests.entry(ip).or_default();

        // On clock skew keep the timestamp rather than letting the request through.
        timestamps.retain(|&t| now.checked_duration_since(t).map(|d| d < self.window).unwrap_or(true));

        if timestamps.len() >= self.max_requests {
            let oldest = timestamps.first().copied().unwrap_or(now);
            let retry_after = match now.checked_duration_since(oldest) {
                Some(elapsed) => self.window.saturating_sub(elapsed),
                None => Duration::from_secs(1),
            };
            return Err(retry_after);
        }

        timestamps.push(now);
        Ok(())
    }

    /// Drops clients that have no requests left inside the window.
    pub async fn cleanup_old_entries(&self) {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        requests.retain(|_, timestamps| {
            timestamps.retain(|&t| now.checked_duration_since(t).map(|d| d < self.window).unwrap_or(true));
            !timestamps.is_empty()
        });
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.requests.read().await.len()
    }
}

/// Axum middleware enforcing the per-client limit from [`AppState::rate_limiter`].
///
/// Rejected requests get `429 Too Many Requests` with a
/// `{"error": "Rate limit exceeded", "detail": "<limit>"}` body and a
/// `Retry-After` header.
pub async fn rate_limit_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(req).await;
    }

    let peer_ip = req.extensions().get::<ConnectInfo<SocketAddr>>().map(|info| info.0.ip());
    let ip = client_ip(req.headers(), peer_ip, state.config.rate_limit.trust_proxy_headers);

    let limiter = &state.rate_limiter;
    match limiter.check_rate_limit(ip).await {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            state.metrics.inc_rate_limited();
            tracing::warn!(%ip, "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": "Rate limit exceeded",
                    "detail": limiter.describe(),
                })),
            )
                .into_response();
            // Round up so clients never retry inside the window.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response.headers_mut().insert(RETRY_AFTER, HeaderValue::from(secs.max(1)));
            response
        }
    }
}

/// Periodically evicts idle clients from `limiter` so the map does not grow unbounded.
pub async fn cleanup_task(limiter: RateLimiter, interval_seconds: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

    loop {
        interval.tick().await;
        limiter.cleanup_old_entries().await;
    }
}

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, Instrument};
use uuid::Uuid;

/// Wraps every request in a `request` span and logs entry and completion.
pub async fn log_request_middleware(req: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        info!("Calling handler");
        let response = next.run(req).await;
        info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Finished calling handler"
        );
        response
    }
    .instrument(span)
    .await
}

//! Structured request logging middleware
//!
//! Emits one line per request with method, path, status and timing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Request logging middleware
///
/// Query strings are left out, as they carry owner IDs.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        duration_ms,
        "Request handled"
    );

    response
}

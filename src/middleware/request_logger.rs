use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Access log line per request: `METHOD uri status - Nms`
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "{} {} {} - {}ms",
            method,
            uri,
            status.as_u16(),
            elapsed_ms
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "{} {} {} - {}ms",
            method,
            uri,
            status.as_u16(),
            elapsed_ms
        );
    }

    response
}

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware that logs each route access with its result.
/// Server errors log at error level, client errors at warn, everything else at info.
pub async fn log_route_access(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    if status.is_server_error() {
        tracing::error!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms);
    } else if status.is_client_error() {
        tracing::warn!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms);
    } else {
        tracing::info!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms);
    }

    response
}

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Request-scoped logging: every request runs inside a span carrying the
/// method, route pattern and a fresh request id, and emits one completion
/// line with the status and latency.
pub async fn request_logging_middleware(
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = matched_path
        .as_ref()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned());

    let span = info_span!(
        "http_request",
        method = %method,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span).await;

    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}

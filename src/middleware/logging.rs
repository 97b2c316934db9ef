use axum::{
    extract::{ConnectInfo, MatchedPath, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs every request with a generated id, and echoes the id back in `x-request-id`
pub async fn request_logging_middleware(req: Request, next: Next) -> Result<Response, StatusCode> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        "incoming request"
    );

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();
    match status {
        500..=599 => tracing::error!(
            request_id = %request_id, method = %method, path = %path, status, duration_ms = %duration_ms,
            "request completed (server error)"
        ),
        400..=499 => tracing::warn!(
            request_id = %request_id, method = %method, path = %path, status, duration_ms = %duration_ms,
            "request completed (client error)"
        ),
        _ => tracing::info!(
            request_id = %request_id, method = %method, path = %path, status, duration_ms = %duration_ms,
            "request completed"
        ),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    Ok(response)
}

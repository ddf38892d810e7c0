use axum::body::Body;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{debug, info, warn};
use super::ApiError;

/// Log every request; POST and PUT bodies are buffered and logged at debug.
///
/// Bodies larger than `max_body_bytes` are rejected with 413.
pub async fn log_requests(
    State(max_body_bytes): State<usize>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!(method = %method, uri = %uri, client = %client, "Request");

    let request = if method == Method::POST || method == Method::PUT {
        let (parts, body) = request.into_parts();
        let bytes = match axum::body::to_bytes(body, max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(method = %method, uri = %uri, error = %e, "Request body rejected");
                return ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
            }
        };
        if !bytes.is_empty() {
            debug!(body = %String::from_utf8_lossy(&bytes), "Request body");
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    let started = Instant::now();
    let response = next.run(request).await;
    debug!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Response"
    );
    response
}

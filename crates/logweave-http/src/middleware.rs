//! HTTP correlation middleware
//!
//! Resolves a correlation id for each inbound request (inbound header, else
//! a fresh UUID), binds it as ambient context for the whole handler future,
//! echoes it on the response, and emits one http-level completion record
//! per request.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use http::header::{HeaderValue, CONTENT_LENGTH, USER_AGENT};
use std::net::SocketAddr;
use std::time::Instant;
use uuid::Uuid;

use logweave_core::{with_correlation_id, Logger};

/// Header carrying the correlation id, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation and request-completion logging middleware.
///
/// Apply with the engine as state:
///
/// ```ignore
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(
///         logger.clone(),
///         logweave_http::correlation_middleware,
///     ));
/// ```
pub async fn correlation_middleware(
    State(logger): State<Logger>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();

    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let remote_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string());
    let request_id = resolve_request_id(&request);

    let mut response = with_correlation_id(request_id.clone(), next.run(request)).await;

    let status = response.status();
    let content_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let mut entry = serde_json::json!({
        "method": method,
        "url": url,
        "statusCode": status.as_u16(),
        "statusMessage": status.canonical_reason().unwrap_or(""),
        "duration": started.elapsed().as_millis() as u64,
        "requestId": request_id,
    });
    if let Some(user_agent) = user_agent {
        entry["userAgent"] = user_agent.into();
    }
    if let Some(remote_address) = remote_address {
        entry["remoteAddress"] = remote_address.into();
    }
    if let Some(content_length) = content_length {
        entry["contentLength"] = content_length.into();
    }

    logger.http("request completed", entry);

    response
}

/// Inbound header wins; a fresh v4 UUID otherwise.
fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

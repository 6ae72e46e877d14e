// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_json;

/// Bodies above this size are passed through unlogged
const MAX_LOGGED_BODY: usize = 1024 * 1024;

/// Renders a body for the log, with credential fields redacted
fn printable(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(mut json) => {
            redact_json(&mut json);
            Some(json.to_string())
        }
        Err(_) => Some(text.to_string()),
    }
}

/// Middleware to log request and response bodies when DEBUG is enabled
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    if let Some(body) = printable(&bytes) {
        debug!(method = %parts.method, uri = %parts.uri, request_body = %body, "Request");
    }

    let response = next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(body) = printable(&bytes) {
        debug!(status = %parts.status, response_body = %body, "Response");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

//! Response construction: error bodies and relay helpers.
//!
//! # Responsibilities
//! - Map gateway errors to HTTP status codes and `{"error": ...}` bodies
//! - Relay upstream payloads without modification
//! - Keep transport detail out of client-visible bodies
//!
//! # Design Decisions
//! - Either the full upstream payload is relayed or an error object
//!   is, never a mix
//! - Failure responses are marked `Cache-Control: no-store`

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::client::{TransportError, UpstreamResponse};

/// Request-handling error taxonomy.
///
/// Upstream non-2xx statuses are not errors here: they are relayed.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required input was missing; no upstream call was made.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Network failure talking to an upstream. Detail stays in logs.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingParameter(_) => {
                error_response(StatusCode::BAD_REQUEST, &self.to_string())
            }
            GatewayError::Transport(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "upstream request failed")
            }
        }
    }
}

/// Build a JSON `{"error": message}` response that will never be cached.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let mut response = (status, Json(json!({ "error": message }))).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Relay an upstream JSON response unchanged: same status, same body.
///
/// A bodiless upstream response (204, or an empty payload) is relayed
/// with an empty body and no content type; nothing attempts to parse it.
pub fn relay_json(upstream: UpstreamResponse) -> Response {
    if upstream.status == StatusCode::NO_CONTENT || upstream.body.is_empty() {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = upstream.status;
        return response;
    }

    let content_type = upstream
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut response = (upstream.status, upstream.body).into_response();
    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    response
}

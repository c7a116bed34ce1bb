//! Entity proxy: NGSI-LD context broker passthrough.
//!
//! Forwards GET/PATCH requests for arbitrary path tails to the broker,
//! decoding URL-encoded URN segments and preserving query strings.
//! Upstream status and body are relayed unchanged; the broker's own
//! error bodies pass through verbatim.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::http::request::request_id;
use crate::http::response::{relay_json, GatewayError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::broker;
use crate::upstream::client::UpstreamRequest;

/// Inbound route prefix stripped before resolving the broker path.
const BROKER_PREFIX: &str = "/api/broker";

/// GET passthrough. The original query string is appended unmodified.
pub async fn entity_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let tail = broker_tail(uri.path());
    let url = broker_url_for(&state, tail, uri.query());
    forward(state, headers, Method::GET, url, None).await
}

/// PATCH passthrough. The parsed JSON body is forwarded verbatim with
/// JSON content-type and accept headers.
pub async fn entity_patch(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let tail = broker_tail(uri.path());
    let url = broker_url_for(&state, tail, None);
    forward(state, headers, Method::PATCH, url, Some(body)).await
}

fn broker_tail(path: &str) -> &str {
    path.strip_prefix(BROKER_PREFIX).unwrap_or(path)
}

fn broker_url_for(state: &AppState, tail: &str, query: Option<&str>) -> String {
    broker::broker_url(&state.config.upstream.broker_url, tail, query)
}

/// Perform the single outbound fetch and relay the result.
async fn forward(
    state: AppState,
    headers: HeaderMap,
    method: Method,
    url: String,
    body: Option<Value>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();
    let method_str = method.to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        url = %url,
        "Proxying broker request"
    );

    let mut upstream_request = match body {
        Some(body) => UpstreamRequest::patch_json(url.as_str(), body),
        None => UpstreamRequest::get(url.as_str()).accept_json(),
    };
    if let Some(token) = &state.config.upstream.broker_token {
        upstream_request = upstream_request.bearer(token.as_str());
    }

    match state.upstream.send(upstream_request).await {
        Ok(upstream) => {
            metrics::record_request("broker", &method_str, upstream.status.as_u16(), start);
            relay_json(upstream)
        }
        Err(err) => {
            // Full detail stays server-side; the client gets a generic body.
            tracing::error!(
                request_id = %request_id,
                method = %method,
                url = %url,
                error = %err,
                "Broker request failed"
            );
            metrics::record_request("broker", &method_str, 500, start);
            GatewayError::Transport(err).into_response()
        }
    }
}

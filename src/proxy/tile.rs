//! Tile proxy: map tile fetch with deterministic host selection.
//!
//! Coordinates arrive as query parameters; a missing coordinate is
//! rejected with `400` before any outbound fetch. Successful tiles are
//! relayed as `image/png` with a 24-hour cache directive and a
//! permissive cross-origin header. Failures are never cacheable.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::http::request::request_id;
use crate::http::response::{error_response, GatewayError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::client::UpstreamRequest;
use crate::upstream::tiles::{self, TileCoord};

const TILE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Raw query parameters; each coordinate is individually optional so
/// missing ones can be named in the error.
#[derive(Debug, Deserialize)]
pub struct TileParams {
    z: Option<u32>,
    x: Option<u32>,
    y: Option<u32>,
}

impl TileParams {
    fn coord(&self) -> Result<TileCoord, GatewayError> {
        let zoom = self.z.ok_or(GatewayError::MissingParameter("z"))?;
        let x = self.x.ok_or(GatewayError::MissingParameter("x"))?;
        let y = self.y.ok_or(GatewayError::MissingParameter("y"))?;
        Ok(TileCoord { zoom, x, y })
    }
}

/// GET handler relaying one PNG tile from the selected upstream host.
pub async fn tile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TileParams>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    let coord = match params.coord() {
        Ok(coord) => coord,
        Err(err) => {
            tracing::debug!(request_id = %request_id, error = %err, "Rejecting tile request");
            metrics::record_request("tiles", "GET", 400, start);
            return err.into_response();
        }
    };

    let Some(host) = tiles::select_host(&state.config.upstream.tile_servers, coord) else {
        // Validation guarantees a non-empty list; an empty one here
        // means the config was constructed without it.
        metrics::record_request("tiles", "GET", 500, start);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "no tile servers configured");
    };
    let url = tiles::tile_url(host, coord);

    tracing::debug!(
        request_id = %request_id,
        zoom = coord.zoom,
        x = coord.x,
        y = coord.y,
        url = %url,
        "Proxying tile request"
    );

    let upstream_request =
        UpstreamRequest::get(url.as_str()).user_agent(state.config.upstream.tile_user_agent.as_str());

    match state.upstream.send(upstream_request).await {
        Ok(upstream) if upstream.status.is_success() => {
            metrics::record_request("tiles", "GET", upstream.status.as_u16(), start);
            tile_response(upstream.status, upstream.body)
        }
        Ok(upstream) => {
            tracing::warn!(
                request_id = %request_id,
                url = %url,
                status = %upstream.status,
                "Tile upstream returned error status"
            );
            metrics::record_request("tiles", "GET", upstream.status.as_u16(), start);
            error_response(upstream.status, "tile fetch failed")
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                url = %url,
                error = %err,
                "Tile request failed"
            );
            metrics::record_request("tiles", "GET", 500, start);
            GatewayError::Transport(err).into_response()
        }
    }
}

fn tile_response(status: StatusCode, body: axum::body::Bytes) -> Response {
    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(TILE_CACHE_CONTROL),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

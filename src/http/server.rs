//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with proxy and health handlers
//! - Wire up middleware (timeout, request ID, tracing, CORS)
//! - Bind the server to a listener and serve until shutdown
//!
//! Every request is handled independently; the only state shared
//! across requests is the immutable configuration and the outbound
//! client, so no synchronization is needed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::request_id_middleware;
use crate::proxy::{entity, tile};
use crate::upstream::client::{HttpUpstream, TransportError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    pub fn new(config: GatewayConfig, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}

/// Build the Axum router with all middleware layers.
///
/// Exposed so tests can drive the exact production router with a
/// scripted upstream client.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

    Router::new()
        .route("/health", get(health))
        .route("/api/tiles", get(tile::tile_handler))
        .route(
            "/api/broker/{*path}",
            get(entity::entity_get).patch(entity::entity_patch),
        )
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration, using
    /// the production reqwest-backed upstream client.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let upstream = HttpUpstream::new(Duration::from_secs(config.timeouts.request_secs))?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// Create a server with an explicit upstream client.
    pub fn with_upstream(config: GatewayConfig, upstream: Arc<dyn UpstreamClient>) -> Self {
        let state = AppState::new(config.clone(), upstream);
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener
    /// until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// Liveness probe for the gateway itself.
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
    })
}

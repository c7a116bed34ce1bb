//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream endpoints (context broker, tile servers).
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the NGSI-LD context broker, including the API root
    /// (e.g., "http://orion:1026/ngsi-ld/v1").
    pub broker_url: String,

    /// Optional bearer token attached to broker requests.
    /// Never logged and never echoed in error responses.
    pub broker_token: Option<String>,

    /// Ordered list of tile server base URLs. A tile request for
    /// (z, x, y) is fetched from `tile_servers[(x + y) % len]`.
    pub tile_servers: Vec<String>,

    /// User-Agent header sent on tile requests, identifying this
    /// gateway to the tile operator.
    pub tile_user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            broker_url: "http://localhost:1026/ngsi-ld/v1".to_string(),
            broker_token: None,
            tile_servers: vec![
                "https://a.tile.openstreetmap.org".to_string(),
                "https://b.tile.openstreetmap.org".to_string(),
                "https://c.tile.openstreetmap.org".to_string(),
            ],
            tile_user_agent: format!("city-gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Applies to both the inbound request and the outbound fetch.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

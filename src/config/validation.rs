//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones: upstream URLs
//! must parse, the tile server list must be non-empty, addresses must
//! be bindable. Returns all validation errors, not just the first, so
//! an operator can fix a config in one pass.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.broker_url {0:?} is not a valid http(s) URL")]
    InvalidBrokerUrl(String),

    #[error("upstream.tile_servers must contain at least one entry")]
    NoTileServers,

    #[error("upstream.tile_servers entry {0:?} is not a valid http(s) URL")]
    InvalidTileServer(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
}

fn is_http_url(raw: &str) -> bool {
    matches!(Url::parse(raw), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !is_http_url(&config.upstream.broker_url) {
        errors.push(ValidationError::InvalidBrokerUrl(
            config.upstream.broker_url.clone(),
        ));
    }

    if config.upstream.tile_servers.is_empty() {
        errors.push(ValidationError::NoTileServers);
    }
    for server in &config.upstream.tile_servers {
        if !is_http_url(server) {
            errors.push(ValidationError::InvalidTileServer(server.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Structured logging.
//!
//! Uses the tracing crate throughout. `RUST_LOG` wins when set;
//! otherwise the configured level applies to the gateway and its HTTP
//! middleware.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Call once at startup.
pub fn init_logging(level: &str) {
    let fallback = format!("city_gateway={level},tower_http={level}");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

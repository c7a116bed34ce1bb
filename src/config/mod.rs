//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (parse) → env overrides → validation.rs → GatewayConfig
//! ```
//!
//! Validation runs before a config is accepted; a config that reaches
//! the server is structurally sound and referentially complete.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig};

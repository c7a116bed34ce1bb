//! City Gateway — proxy front for smart-city dashboards.
//!
//! A small stateless HTTP gateway that sits between browser clients and
//! two upstreams: an NGSI-LD (Orion) context broker and a set of
//! OpenStreetMap-compatible raster tile servers. Its job is CORS
//! avoidance and upstream host selection, not resilience: every request
//! performs exactly one outbound fetch, with no retries and no shared
//! mutable state between requests.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

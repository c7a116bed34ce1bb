//! Outbound upstream subsystem.
//!
//! # Data Flow
//! ```text
//! proxy handler
//!     → broker.rs / tiles.rs (resolve upstream URL)
//!     → client.rs (single outbound fetch via UpstreamClient)
//!     → handler relays status + body
//! ```
//!
//! The `UpstreamClient` trait is the only seam between handlers and
//! the network; tests substitute a counting mock behind it.

pub mod broker;
pub mod client;
pub mod tiles;

pub use client::{HttpUpstream, TransportError, UpstreamClient, UpstreamRequest, UpstreamResponse};
pub use tiles::TileCoord;

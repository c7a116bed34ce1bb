//! Proxy request handlers.
//!
//! Two translators, each a pure function of its input plus one
//! outbound fetch:
//! - `entity` — NGSI-LD context broker passthrough (GET/PATCH)
//! - `tile` — map tile fetch with deterministic host selection

pub mod entity;
pub mod tile;

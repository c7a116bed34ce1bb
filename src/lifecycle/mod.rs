//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:  Load config → Validate → Init logging/metrics → Bind → Serve
//! Shutdown: SIGTERM/SIGINT → broadcast → serve drains → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

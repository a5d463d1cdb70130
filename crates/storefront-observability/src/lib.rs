//! Observability infrastructure for the storefront tools.
//!
//! This crate provides:
//! - `StructuredLogger` - User-facing structured log lines with session context
//! - `SessionId` - Correlates every line emitted by one invocation
//! - `init_tracing` - Installs a `tracing` subscriber for library diagnostics

mod logging;
mod session;
mod subscriber;

pub use logging::*;
pub use session::SessionId;
pub use subscriber::{init_tracing, TracingOptions};

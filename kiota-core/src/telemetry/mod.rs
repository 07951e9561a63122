//! Telemetry modules for kiota.
//!
//! Re-exports the crates used by kiota for logging and (open) telemetry,
//! such that middleware authors do not need to depend on them directly.

pub mod opentelemetry;
pub mod tracing;

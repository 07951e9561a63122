//! openelemetry module re-exports
//!
//! This module re-exports the opentelemetry api used by kiota,
//! such that you can create tracers and spans for custom middleware.

#[doc(inline)]
pub use ::opentelemetry::*;

//! Http middleware for kiota generated api clients.
//!
//! Requests made by a kiota client flow through a pipeline of
//! [`Layer`]s before reaching the transport. Each layer wraps the next
//! stage as a [`Service`], may decorate the request and returns the
//! response (or error) of the stage it wraps.
//!
//! | layer | purpose |
//! |-|-|
//! | [`UserAgentLayer`] | identify the kiota product in the `User-Agent` header |
//!
//! Tracing is opt-in per request by inserting a [`ParentSpan`]
//! in the request extensions, using a tracer created via [`ObservabilityOptions`].
//!
//! [`Layer`]: kiota_core::Layer
//! [`Service`]: kiota_core::Service
//! [`UserAgentLayer`]: crate::layer::user_agent::UserAgentLayer
//! [`ParentSpan`]: crate::telemetry::ParentSpan
//! [`ObservabilityOptions`]: crate::telemetry::ObservabilityOptions

pub mod layer;
pub mod telemetry;

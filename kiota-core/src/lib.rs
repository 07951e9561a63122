//! `async fn serve(&self, Input) -> Result<Response, Error>`
//!
//! # kiota service
//!
//! The building blocks of the kiota http pipeline: every middleware
//! is a [`Layer`] producing a [`Service`] that wraps the next stage,
//! all the way down to the transport.
//!
//! Heavily inspired by [tower-service](https://docs.rs/tower-service/0.3.0/tower_service/trait.Service.html),
//! using async methods in traits instead of `poll_ready` + `call`.

pub mod error;

pub mod service;
pub use service::Service;

pub mod layer;
pub use layer::Layer;

pub mod telemetry;

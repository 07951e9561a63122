//! Http [`Layer`]s for the kiota request pipeline.
//!
//! [`Layer`]: kiota_core::Layer

pub mod user_agent;

//! Service type and utilities.
//!
//! Services are the abstraction of the stages in a kiota pipeline:
//! middleware wrapping an inner service, down to the transport at the bottom.

mod svc;
#[doc(inline)]
pub use svc::{BoxService, Service};

pub mod handler;
pub use handler::service_fn;

//! `async fn(Input)` as [`Service`].

use crate::Service;
use std::fmt;

/// Create a [`ServiceFn`] from a function taking the input of the service.
///
/// This is the typical way to plug a transport (or a fake one in tests)
/// at the bottom of a pipeline.
pub const fn service_fn<F>(f: F) -> ServiceFn<F> {
    ServiceFn { f }
}

/// A [`Service`] implemented using a function.
///
/// Created using [`service_fn`].
#[derive(Clone)]
pub struct ServiceFn<F> {
    f: F,
}

impl<F> fmt::Debug for ServiceFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceFn")
            .field("f", &std::any::type_name::<F>())
            .finish()
    }
}

impl<F, Fut, Input, O, E> Service<Input> for ServiceFn<F>
where
    F: Fn(Input) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    type Response = O;
    type Error = E;

    fn serve(
        &self,
        input: Input,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_ {
        (self.f)(input)
    }
}

//! [`Service`] and [`BoxService`] traits.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

/// A stage of the kiota pipeline,
/// serving a response (or error) for the given input.
pub trait Service<Input>: Sized + Send + Sync + 'static {
    /// The type of response returned by the service.
    type Response: Send + 'static;

    /// The type of error returned by the service.
    type Error: Send + 'static;

    /// Serve a response or error for the given input.
    fn serve(
        &self,
        input: Input,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_;

    /// Box this service to allow for dynamic dispatch.
    fn boxed(self) -> BoxService<Input, Self::Response, Self::Error> {
        BoxService::new(self)
    }
}

impl<S, Input> Service<Input> for Arc<S>
where
    S: Service<Input>,
{
    type Response = S::Response;
    type Error = S::Error;

    #[inline]
    fn serve(
        &self,
        input: Input,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_ {
        self.as_ref().serve(input)
    }
}

impl<S, Input> Service<Input> for Box<S>
where
    S: Service<Input>,
{
    type Response = S::Response;
    type Error = S::Error;

    #[inline]
    fn serve(
        &self,
        input: Input,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_ {
        self.as_ref().serve(input)
    }
}

/// Object safe counterpart of [`Service`], boxing the returned future.
///
/// See <https://rust-lang.github.io/async-fundamentals-initiative/evaluation/case-studies/builder-provider-api.html#dynamic-dispatch-behind-the-api>.
trait DynService<Input> {
    type Response;
    type Error;

    fn serve_box(
        &self,
        input: Input,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + '_>>;
}

impl<Input, T> DynService<Input> for T
where
    T: Service<Input>,
{
    type Response = T::Response;
    type Error = T::Error;

    fn serve_box(
        &self,
        input: Input,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + '_>> {
        Box::pin(self.serve(input))
    }
}

/// A boxed [`Service`], to serve inputs with,
/// for where you require dynamic dispatch.
pub struct BoxService<Input, Response, Error> {
    inner: Arc<dyn DynService<Input, Response = Response, Error = Error> + Send + Sync + 'static>,
}

impl<Input, Response, Error> Clone for BoxService<Input, Response, Error> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<Input, Response, Error> BoxService<Input, Response, Error> {
    /// Create a new [`BoxService`] from the given service.
    #[inline]
    pub fn new<T>(service: T) -> Self
    where
        T: Service<Input, Response = Response, Error = Error>,
    {
        Self {
            inner: Arc::new(service),
        }
    }
}

impl<Input, Response, Error> fmt::Debug for BoxService<Input, Response, Error> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxService").finish()
    }
}

impl<Input, Response, Error> Service<Input> for BoxService<Input, Response, Error>
where
    Input: 'static,
    Response: Send + 'static,
    Error: Send + 'static,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn serve(
        &self,
        input: Input,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_ {
        self.inner.serve_box(input)
    }

    #[inline]
    fn boxed(self) -> Self {
        self
    }
}

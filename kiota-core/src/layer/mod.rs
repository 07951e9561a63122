//! Layer type and utilities.
//!
//! Layers are the abstraction of middleware in kiota.
//! A tuple of layers wraps a service from the outside in:
//! the first layer of the tuple sees the input first.

/// A layer that produces a Layered service (middleware(inner service)).
pub trait Layer<S>: Sized {
    /// The service produced by the layer.
    type Service;

    /// Wrap the given service with the middleware, returning a new service.
    fn layer(&self, inner: S) -> Self::Service;

    /// Same as `layer` but consuming self after the service was created.
    ///
    /// This is useful in case you no longer need the layer after the service
    /// is created. By default this calls `layer` but if your `layer`
    /// clones data you might want to move it instead.
    fn into_layer(self, inner: S) -> Self::Service {
        self.layer(inner)
    }
}

impl<T, S> Layer<S> for &T
where
    T: Layer<S>,
{
    type Service = T::Service;

    fn layer(&self, inner: S) -> Self::Service {
        (**self).layer(inner)
    }
}

impl<S> Layer<S> for () {
    type Service = S;

    fn layer(&self, service: S) -> Self::Service {
        service
    }
}

impl<S, L1> Layer<S> for (L1,)
where
    L1: Layer<S>,
{
    type Service = L1::Service;

    fn layer(&self, service: S) -> Self::Service {
        let (l1,) = self;
        l1.layer(service)
    }

    fn into_layer(self, service: S) -> Self::Service {
        let (l1,) = self;
        l1.into_layer(service)
    }
}

impl<S, L1, L2> Layer<S> for (L1, L2)
where
    L1: Layer<L2::Service>,
    L2: Layer<S>,
{
    type Service = L1::Service;

    fn layer(&self, service: S) -> Self::Service {
        let (l1, l2) = self;
        l1.layer(l2.layer(service))
    }

    fn into_layer(self, service: S) -> Self::Service {
        let (l1, l2) = self;
        l1.into_layer(l2.into_layer(service))
    }
}

impl<S, L1, L2, L3> Layer<S> for (L1, L2, L3)
where
    L1: Layer<L2::Service>,
    L2: Layer<L3::Service>,
    L3: Layer<S>,
{
    type Service = L1::Service;

    fn layer(&self, service: S) -> Self::Service {
        let (l1, l2, l3) = self;
        l1.layer((l2, l3).layer(service))
    }

    fn into_layer(self, service: S) -> Self::Service {
        let (l1, l2, l3) = self;
        l1.into_layer((l2, l3).into_layer(service))
    }
}

impl<S, L1, L2, L3, L4> Layer<S> for (L1, L2, L3, L4)
where
    L1: Layer<L2::Service>,
    L2: Layer<L3::Service>,
    L3: Layer<L4::Service>,
    L4: Layer<S>,
{
    type Service = L1::Service;

    fn layer(&self, service: S) -> Self::Service {
        let (l1, l2, l3, l4) = self;
        l1.layer((l2, l3, l4).layer(service))
    }

    fn into_layer(self, service: S) -> Self::Service {
        let (l1, l2, l3, l4) = self;
        l1.into_layer((l2, l3, l4).into_layer(service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Service;
    use crate::service::service_fn;
    use std::convert::Infallible;

    #[derive(Debug, Clone)]
    struct Push(&'static str);

    #[derive(Debug, Clone)]
    struct PushService<S> {
        inner: S,
        tag: &'static str,
    }

    impl<S> Layer<S> for Push {
        type Service = PushService<S>;

        fn layer(&self, inner: S) -> Self::Service {
            PushService { inner, tag: self.0 }
        }
    }

    impl<S> Service<Vec<&'static str>> for PushService<S>
    where
        S: Service<Vec<&'static str>>,
    {
        type Response = S::Response;
        type Error = S::Error;

        async fn serve(
            &self,
            mut input: Vec<&'static str>,
        ) -> Result<Self::Response, Self::Error> {
            input.push(self.tag);
            self.inner.serve(input).await
        }
    }

    #[tokio::test]
    async fn tuple_layers_apply_outermost_first() {
        let svc = (Push("a"), Push("b"), Push("c"))
            .into_layer(service_fn(async |input: Vec<&'static str>| {
                Ok::<_, Infallible>(input)
            }));

        let trail = svc.serve(Vec::new()).await.unwrap();
        assert_eq!(trail, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn unit_layer_is_identity() {
        let svc = ().layer(service_fn(async |n: u8| Ok::<_, Infallible>(n)));
        assert_eq!(svc.serve(7).await.unwrap(), 7);
    }
}

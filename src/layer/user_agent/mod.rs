//! Middleware that identifies the kiota product in the `User-Agent` header.
//!
//! The `{product_name}/{product_version}` token of the [`UserAgentHandlerOption`]
//! is appended to the `User-Agent` header of outgoing requests, unless that header
//! already contains it. Values set by the caller are never removed.
//!
//! # Example
//!
//! ```
//! use kiota_core::service::service_fn;
//! use kiota_core::{Layer, Service};
//! use kiota_http::layer::user_agent::{UserAgentHandlerOption, UserAgentLayer};
//! use http::{Request, Response, header::USER_AGENT};
//! use std::convert::Infallible;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = service_fn(async |req: Request<()>| {
//!     assert_eq!(req.headers()[USER_AGENT], "curl/7.64 kiota-python/1.0.0");
//!     Ok::<_, Infallible>(Response::new(()))
//! });
//!
//! let client = UserAgentLayer::new(Some(UserAgentHandlerOption::new(
//!     "kiota-python",
//!     "1.0.0",
//! )))
//! .into_layer(transport);
//!
//! let request = Request::builder()
//!     .header(USER_AGENT, "curl/7.64")
//!     .body(())
//!     .unwrap();
//! client.serve(request).await.unwrap();
//! # }
//! ```

use crate::telemetry::{ParentSpan, USER_AGENT_ENABLED_ATTRIBUTE, USER_AGENT_SPAN_NAME};
use http::{
    HeaderMap, HeaderValue, Request,
    header::{Entry, USER_AGENT},
};
use kiota_core::telemetry::opentelemetry::{
    KeyValue,
    trace::{Span as _, Tracer, noop::NoopTracer},
};
use kiota_core::telemetry::tracing;
use kiota_core::{Layer, Service};
use memchr::memmem;
use std::fmt;

mod option;
#[doc(inline)]
pub use option::{DEFAULT_PRODUCT_NAME, DEFAULT_PRODUCT_VERSION, UserAgentHandlerOption};

/// Layer that applies the [`UserAgentService`] middleware.
///
/// See the [module docs](self) for more details.
pub struct UserAgentLayer<T = NoopTracer> {
    option: UserAgentHandlerOption,
    tracer: T,
}

impl UserAgentLayer {
    /// Create a new [`UserAgentLayer`].
    ///
    /// Falls back to [`UserAgentHandlerOption::default`] if no option is given.
    /// Spans are not recorded until a tracer is set using [`UserAgentLayer::with_tracer`].
    pub fn new(option: Option<UserAgentHandlerOption>) -> Self {
        Self {
            option: option.unwrap_or_default(),
            tracer: NoopTracer::new(),
        }
    }
}

impl<T> UserAgentLayer<T> {
    /// Use the given tracer for the spans of this middleware,
    /// see [`ObservabilityOptions::tracer`] to create one.
    ///
    /// [`ObservabilityOptions::tracer`]: crate::telemetry::ObservabilityOptions::tracer
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> UserAgentLayer<U> {
        UserAgentLayer {
            option: self.option,
            tracer,
        }
    }
}

impl Default for UserAgentLayer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> fmt::Debug for UserAgentLayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentLayer")
            .field("option", &self.option)
            .field("tracer", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Clone> Clone for UserAgentLayer<T> {
    fn clone(&self) -> Self {
        Self {
            option: self.option.clone(),
            tracer: self.tracer.clone(),
        }
    }
}

impl<S, T: Clone> Layer<S> for UserAgentLayer<T> {
    type Service = UserAgentService<S, T>;

    fn layer(&self, inner: S) -> Self::Service {
        UserAgentService {
            inner,
            option: self.option.clone(),
            tracer: self.tracer.clone(),
        }
    }

    fn into_layer(self, inner: S) -> Self::Service {
        UserAgentService {
            inner,
            option: self.option,
            tracer: self.tracer,
        }
    }
}

/// Middleware that appends the product token to the `User-Agent` header.
///
/// A [`UserAgentHandlerOption`] found in the extensions of a request
/// overrides the option of the service for that request.
/// If the request carries a [`ParentSpan`] a span named
/// [`USER_AGENT_SPAN_NAME`] is recorded for the header decoration,
/// the call to the inner service is not part of it.
///
/// See the [module docs](self) for more details.
pub struct UserAgentService<S, T = NoopTracer> {
    inner: S,
    option: UserAgentHandlerOption,
    tracer: T,
}

impl<S> UserAgentService<S> {
    /// Create a new [`UserAgentService`].
    ///
    /// Falls back to [`UserAgentHandlerOption::default`] if no option is given.
    pub fn new(inner: S, option: Option<UserAgentHandlerOption>) -> Self {
        UserAgentLayer::new(option).into_layer(inner)
    }
}

impl<S: fmt::Debug, T> fmt::Debug for UserAgentService<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentService")
            .field("inner", &self.inner)
            .field("option", &self.option)
            .field("tracer", &std::any::type_name::<T>())
            .finish()
    }
}

impl<S: Clone, T: Clone> Clone for UserAgentService<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            option: self.option.clone(),
            tracer: self.tracer.clone(),
        }
    }
}

impl<S, T> UserAgentService<S, T>
where
    T: Tracer,
{
    fn decorate<Body>(&self, req: &mut Request<Body>) {
        let mut span = req
            .extensions()
            .get::<ParentSpan>()
            .map(|parent| {
                self.tracer
                    .start_with_context(USER_AGENT_SPAN_NAME, parent.context())
            });

        let token = match req.extensions().get::<UserAgentHandlerOption>() {
            Some(option) => {
                tracing::trace!("user agent option overwritten by request extension");
                option.enabled_token()
            }
            None => self.option.enabled_token(),
        };

        match token {
            Some(token) => {
                if let Some(span) = span.as_mut() {
                    span.set_attribute(KeyValue::new(USER_AGENT_ENABLED_ATTRIBUTE, true));
                }
                append_token(req.headers_mut(), &token);
            }
            None => tracing::trace!("user agent decoration disabled"),
        }

        if let Some(mut span) = span {
            span.end();
        }
    }
}

impl<S, T, Body> Service<Request<Body>> for UserAgentService<S, T>
where
    S: Service<Request<Body>>,
    T: Tracer + Send + Sync + 'static,
{
    type Response = S::Response;
    type Error = S::Error;

    fn serve(
        &self,
        mut req: Request<Body>,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + '_ {
        self.decorate(&mut req);
        self.inner.serve(req)
    }
}

/// Append the token to the last `User-Agent` value,
/// unless any of the values already contains it.
///
/// Containment is a plain substring match on the raw header bytes.
/// Multiple `User-Agent` values are kept as separate values: they are not
/// folded into a single `", "` joined value the way httpx based clients do.
fn append_token(headers: &mut HeaderMap, token: &str) {
    match headers.entry(USER_AGENT) {
        Entry::Vacant(entry) => match HeaderValue::from_str(token) {
            Ok(value) => {
                tracing::trace!(%token, "set user agent header");
                entry.insert(value);
            }
            Err(err) => {
                tracing::warn!(%token, %err, "user agent token is not a valid header value");
            }
        },
        Entry::Occupied(mut entry) => {
            if entry
                .iter()
                .any(|value| memmem::find(value.as_bytes(), token.as_bytes()).is_some())
            {
                tracing::trace!(%token, "user agent header already contains token");
                return;
            }

            let Some(last) = entry.iter_mut().next_back() else {
                return;
            };

            let mut bytes = Vec::with_capacity(last.len() + 1 + token.len());
            bytes.extend_from_slice(last.as_bytes());
            if !bytes.is_empty() {
                bytes.push(b' ');
            }
            bytes.extend_from_slice(token.as_bytes());

            match HeaderValue::from_bytes(&bytes) {
                Ok(mut value) => {
                    tracing::trace!(%token, "appended token to user agent header");
                    value.set_sensitive(last.is_sensitive());
                    *last = value;
                }
                Err(err) => {
                    tracing::warn!(%token, %err, "user agent token is not a valid header value");
                }
            }
        }
    }
}

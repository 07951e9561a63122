//! Observability support for the kiota http middleware.
//!
//! Middleware never reaches for a process-wide tracer:
//! a tracer is created once from the [`TracerProvider`] of your choice
//! using [`ObservabilityOptions::tracer`] and handed to the layers that
//! emit spans. Spans are only emitted for requests that carry a [`ParentSpan`]
//! in their extensions.

use kiota_core::telemetry::opentelemetry::{
    Context, InstrumentationScope,
    trace::{TraceContextExt as _, TracerProvider},
};
use std::borrow::Cow;

/// Name of the span emitted by the [`UserAgentLayer`].
///
/// [`UserAgentLayer`]: crate::layer::user_agent::UserAgentLayer
pub const USER_AGENT_SPAN_NAME: &str = "UserAgentDecorator_send";

/// Span attribute recorded when the [`UserAgentLayer`] is enabled.
///
/// [`UserAgentLayer`]: crate::layer::user_agent::UserAgentLayer
pub const USER_AGENT_ENABLED_ATTRIBUTE: &str = "handler.useragent.enable";

/// Options used to create the tracer of the kiota http middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityOptions {
    tracer_instrumentation_name: Cow<'static, str>,
}

impl Default for ObservabilityOptions {
    fn default() -> Self {
        Self {
            tracer_instrumentation_name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
        }
    }
}

impl ObservabilityOptions {
    /// Create new [`ObservabilityOptions`] with the default instrumentation name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the instrumentation name of the tracer.
    #[must_use]
    pub fn with_tracer_instrumentation_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.tracer_instrumentation_name = name.into();
        self
    }

    /// Instrumentation name used for the tracer.
    pub fn tracer_instrumentation_name(&self) -> &str {
        &self.tracer_instrumentation_name
    }

    /// Create a tracer from the given provider,
    /// scoped to the instrumentation name and the version of this crate.
    pub fn tracer<P>(&self, provider: &P) -> P::Tracer
    where
        P: TracerProvider,
    {
        let scope = InstrumentationScope::builder(self.tracer_instrumentation_name.clone())
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        provider.tracer_with_scope(scope)
    }
}

/// The (opentelemetry) [`Context`] of the span that
/// spans of the kiota http middleware are to be nested under.
///
/// Insert it in the extensions of a request to enable tracing for that request.
#[derive(Debug, Clone)]
pub struct ParentSpan(Context);

impl ParentSpan {
    /// Create a new [`ParentSpan`] from the given [`Context`].
    pub const fn new(cx: Context) -> Self {
        Self(cx)
    }

    /// Create a [`ParentSpan`] from the current [`Context`].
    pub fn current() -> Self {
        Self(Context::current())
    }

    /// Reference to the parent [`Context`].
    pub fn context(&self) -> &Context {
        &self.0
    }

    /// Returns `true` if the parent [`Context`] has an active span.
    pub fn has_active_span(&self) -> bool {
        self.0.has_active_span()
    }
}

impl From<Context> for ParentSpan {
    fn from(cx: Context) -> Self {
        Self(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiota_core::telemetry::opentelemetry::trace::{Span as _, Tracer as _};
    use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider};

    #[test]
    fn default_instrumentation_name() {
        assert_eq!(
            ObservabilityOptions::new().tracer_instrumentation_name(),
            "kiota-http"
        );
        assert_eq!(
            ObservabilityOptions::new()
                .with_tracer_instrumentation_name("graph-sdk")
                .tracer_instrumentation_name(),
            "graph-sdk"
        );
    }

    #[test]
    fn tracer_is_scoped_to_instrumentation_name() {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();

        let tracer = ObservabilityOptions::new()
            .with_tracer_instrumentation_name("graph-sdk")
            .tracer(&provider);
        tracer.start("work").end();

        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].instrumentation_scope.name(), "graph-sdk");
        assert_eq!(
            spans[0].instrumentation_scope.version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn parent_span_active_span() {
        assert!(!ParentSpan::new(Context::new()).has_active_span());

        let provider = SdkTracerProvider::builder().build();
        let tracer = ObservabilityOptions::new().tracer(&provider);
        let parent = ParentSpan::from(Context::new().with_span(tracer.start("parent")));
        assert!(parent.has_active_span());
    }
}

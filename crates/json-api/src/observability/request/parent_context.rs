//! W3C `traceparent` extraction, so a storefront or gateway span can parent the
//! span of the cart or checkout call it made.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The caller's trace context, or `None` when the headers carry no valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    // Start from an empty context; the current task's span must never become the parent.
    let context = global::get_text_map_propagator(|propagator| {
        propagator.extract_with_context(&Context::new(), &RequestHeaders(headers))
    });

    let has_remote_parent = context.span().span_context().is_valid();

    has_remote_parent.then_some(context)
}

#[derive(Debug)]
struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

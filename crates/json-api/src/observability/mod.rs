//! Logs, traces and metrics for the trolley API.
//!
//! Every request gets a span with its request ID and route, and is counted in the
//! Prometheus registry served at `/metrics`. Spans go to an OTLP collector when
//! export is enabled. Health checks and metric scrapes are not traced.

use thiserror::Error;

mod init;
mod logging;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::metrics_handler;
pub(crate) use request::request_logging;

/// Reasons observability could not be started.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP span exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("a global tracing subscriber is already installed: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

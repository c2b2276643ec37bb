//! Global tracing subscriber: the env filter, one line formatter and, when spans
//! are exported, the OpenTelemetry bridge.

use opentelemetry_sdk::trace::SdkTracer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

/// Install the process subscriber. `RUST_LOG` directives in the environment win over
/// the configured level.
pub(super) fn init_subscriber(
    logging: &LoggingConfig,
    tracer: Option<SdkTracer>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directives()));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)));

    match logging.log_format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .try_init(),
    }?;

    Ok(())
}

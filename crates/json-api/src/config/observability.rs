//! Logging and telemetry flags for the trolley API process.

use clap::Args;

/// Dependencies whose `info` output drowns out request logs.
const QUIET_TARGETS: [&str; 6] = ["sqlx", "h2", "hyper", "tower", "tonic", "opentelemetry"];

/// How log lines are rendered.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One readable line per event, for a terminal.
    Compact,

    /// One JSON object per event, for log shipping.
    Json,
}

/// Log output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level for trolley's own targets (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Line format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives: the configured level, with noisy dependencies held at `warn`.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        QUIET_TARGETS
            .iter()
            .fold(self.log_level.clone(), |directives, target| {
                format!("{directives},{target}=warn")
            })
    }
}

/// Trace export and request timing settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export request spans over OTLP.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = true)]
    pub otel_enabled: bool,

    /// Continue a caller's trace when a request carries `traceparent`.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// Seconds to wait on the collector before dropping a batch.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// `service.name` resource attribute.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "trolley-json")]
    pub otel_service_name: String,

    /// `service.version` resource attribute.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// `deployment.environment` resource attribute.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Fraction of traces kept, in [0.0, 1.0].
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this many milliseconds are logged at `warn`.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Whether incoming `traceparent` headers should parent request spans.
    ///
    /// Only meaningful while spans are exported.
    #[must_use]
    pub fn propagates_parent_context(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}

//! Per-request span, access log and metrics hoop.
//!
//! Each API call runs inside an `http.request` span carrying its request ID,
//! templated route and, once the auth middleware has run, the shopper's user UUID.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::*;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Probes and scrapes; tracing them only adds noise.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// How a finished request is reported in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Rejected,
    Failed,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Ok
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.otel_path,
        remote_addr = %req.remote_addr(),
        user = field::Empty,
        status = field::Empty,
        duration_ms = field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach caller trace to request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), elapsed.as_secs_f64());

    if let Some(user) = depot.user_uuid() {
        span.record("user", field::display(user));
    }

    report(&span, status, elapsed);
}

fn report(span: &Span, status: StatusCode, elapsed: Duration) {
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        match Outcome::of(status) {
            Outcome::Failed => error!(status = status.as_u16(), duration_ms, "request failed"),
            Outcome::Rejected => warn!(status = status.as_u16(), duration_ms, "request rejected"),
            Outcome::Ok => info!(status = status.as_u16(), duration_ms, "request completed"),
        }

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "slow request");
        }
    });
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webfinger_requests_total` (counter): requests by method, status
//! - `webfinger_request_duration_seconds` (histogram): latency distribution
//! - `webfinger_upstream_passthrough_total` (counter): non-JSON bodies forwarded as-is
//! - `webfinger_hrefs_rewritten_total` (counter): href values changed
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("webfinger_requests_total", "Total webfinger requests served");
    describe_histogram!(
        "webfinger_request_duration_seconds",
        "Request duration in seconds, upstream fetch included"
    );
    describe_counter!(
        "webfinger_upstream_passthrough_total",
        "Upstream bodies forwarded unchanged because they were not JSON"
    );
    describe_counter!("webfinger_hrefs_rewritten_total", "Href values rewritten");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Bounded `method` label value. The route accepts any method, including
/// extension methods, so everything but GET/HEAD/POST shares one bucket.
pub fn method_label(method: &Method) -> &'static str {
    if method == Method::GET {
        "GET"
    } else if method == Method::HEAD {
        "HEAD"
    } else if method == Method::POST {
        "POST"
    } else {
        "other"
    }
}

pub fn record_request(method: &Method, status: u16, start: Instant) {
    let method = method_label(method);
    let status = status.to_string();
    counter!("webfinger_requests_total", "method" => method, "status" => status.clone())
        .increment(1);
    histogram!("webfinger_request_duration_seconds", "method" => method, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_passthrough() {
    counter!("webfinger_upstream_passthrough_total").increment(1);
}

pub fn record_hrefs_rewritten(count: usize) {
    counter!("webfinger_hrefs_rewritten_total").increment(count as u64);
}

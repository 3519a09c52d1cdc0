//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status
//! - `gateway_request_duration_seconds` (histogram): latency by method
//! - `gateway_redirects_total` (counter): legacy redirects by rule
//! - `gateway_upstream_errors_total` (counter): failed upstream forwards

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored: the gateway serves
/// traffic with or without a scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("gateway_requests_total", "Total requests handled by the gateway");
            describe_histogram!(
                "gateway_request_duration_seconds",
                "Request latency in seconds"
            );
            describe_counter!("gateway_redirects_total", "Legacy redirects issued, by rule");
            describe_counter!(
                "gateway_upstream_errors_total",
                "Upstream forwarding failures"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Record one issued legacy redirect.
pub fn record_redirect(rule: &'static str) {
    counter!("gateway_redirects_total", "rule" => rule).increment(1);
}

/// Record one failed upstream forward.
pub fn record_upstream_error() {
    counter!("gateway_upstream_errors_total").increment(1);
}

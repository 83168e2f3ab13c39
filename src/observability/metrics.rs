//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forward_requests_total` (counter): forwarded requests by method, status
//! - `forward_request_duration_seconds` (histogram): time to response head
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Exporter failures are logged, never fatal

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one request.
pub fn record_request(method: &Method, status: StatusCode, start: Instant) {
    let method = method.as_str().to_string();
    metrics::counter!(
        "forward_requests_total",
        "method" => method.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("forward_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

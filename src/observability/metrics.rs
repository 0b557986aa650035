//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_batch_items_total` (counter): queries received in bulk requests
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init_metrics`] installs the Prometheus exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to install Prometheus exporter: {0}")]
    Install(#[from] metrics_exporter_prometheus::BuildError),
}

/// Start the Prometheus HTTP listener on `addr`.
///
/// Must run inside a Tokio runtime. Only one exporter can be installed per
/// process.
pub fn init_metrics(addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!("gateway_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "gateway_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request duration in seconds"
    );
    metrics::describe_counter!(
        "gateway_batch_items_total",
        "Queries received through the bulk endpoints"
    );

    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("gateway_requests_total", &labels).increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of an accepted bulk request.
pub fn record_batch(operation: &'static str, items: usize) {
    metrics::counter!("gateway_batch_items_total", "operation" => operation).increment(items as u64);
}

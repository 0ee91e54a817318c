//! Metrics collection and exposition.
//!
//! # Metrics
//! - `loader_requests_total` (counter): loads by integration, outcome
//! - `integration_items_total` (counter): items returned by integration
//! - `oauth_callbacks_total` (counter): OAuth callbacks by integration, outcome

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_load(integration: &str, outcome: &'static str) {
    metrics::counter!(
        "loader_requests_total",
        "integration" => integration.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_items(integration: &'static str, count: usize) {
    metrics::counter!("integration_items_total", "integration" => integration)
        .increment(count as u64);
}

pub fn record_oauth_callback(integration: &'static str, outcome: &'static str) {
    metrics::counter!(
        "oauth_callbacks_total",
        "integration" => integration,
        "outcome" => outcome
    )
    .increment(1);
}

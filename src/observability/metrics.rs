//! Metrics collection and exposition.
//!
//! # Metrics
//! - `quote_relay_requests_total` (counter): requests by outcome
//! - `quote_relay_fetch_duration_seconds` (histogram): upstream fetch latency
//! - `quote_relay_persist_total` (counter): persistence attempts by outcome
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one inbound request.
pub fn record_request(outcome: &'static str) {
    counter!("quote_relay_requests_total", "outcome" => outcome).increment(1);
}

/// Record an upstream fetch that started at `start`.
pub fn record_fetch(start: Instant) {
    histogram!("quote_relay_fetch_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one persistence attempt.
pub fn record_persist(outcome: &'static str) {
    counter!("quote_relay_persist_total", "outcome" => outcome).increment(1);
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mvc_dispatch_total` (counter): dispatches by method, outcome
//! - `mvc_dispatch_duration_seconds` (histogram): lookup + handler latency
//! - `mvc_registered_routes` (gauge): size of the frozen route table
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Label values come from closed sets; client-supplied text never
//!   becomes a label
//! - Prometheus exporter is optional and off by default

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// `method` is a canonical method token or `"unknown"`.
pub fn record_dispatch(method: &'static str, outcome: &'static str, start: Instant) {
    counter!("mvc_dispatch_total", "method" => method, "outcome" => outcome).increment(1);
    histogram!("mvc_dispatch_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_registered_routes(count: usize) {
    gauge!("mvc_registered_routes").set(count as f64);
}

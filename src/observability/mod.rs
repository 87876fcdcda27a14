//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, scanning, server:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through the trace layer's spans
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay, upstream and store produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Persistence outcomes are only visible here, never to the caller

pub mod logging;
pub mod metrics;

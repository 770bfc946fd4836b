//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request handler produces:
//!     → logging.rs (structured log events, request ID in the span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;

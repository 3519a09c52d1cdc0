//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log events
//! - Metric updates are cheap (atomic increments)
//! - Redirect counters are labeled by rule name so the legacy traffic mix
//!   stays visible during the migration window

pub mod logging;
pub mod metrics;

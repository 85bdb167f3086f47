//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! process.rs samples the process into metrics.rs on an interval
//!
//! Consumers:
//!     → stdout (JSON lines)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap (atomic increments)
//! - Request ID flows through the trace span of every request

pub mod logging;
pub mod metrics;
pub mod process;

pub use metrics::MetricsRegistry;
pub use process::ProcessCollector;

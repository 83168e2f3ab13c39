//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardHandler / HttpServer produce:
//!     → logging.rs (structured log events, request/response head lines)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Logging never fails a request
//! - Metrics are cheap and disabled by default

pub mod logging;
pub mod metrics;

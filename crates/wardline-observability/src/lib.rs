//! # Wardline Observability
//!
//! - [`logging`]: subscriber setup and per-request log lines
//! - [`metrics`]: Prometheus recorder, HTTP metrics middleware and
//!   domain counters
//!
//! # Example
//!
//! ```no_run
//! use wardline_observability::{init_logging, init_metrics};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging("info", None)?;
//!     let handle = init_metrics()?;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_logging, logging_middleware};
pub use self::metrics::{
    init_metrics, metrics_middleware, metrics_router, track_entity_created, track_login,
};
pub use metrics_exporter_prometheus::PrometheusHandle;
pub use tracing_appender::non_blocking::WorkerGuard;

/// Coarse label for an HTTP status code.
pub(crate) fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}

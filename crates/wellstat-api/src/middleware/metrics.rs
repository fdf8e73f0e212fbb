//! # Request Metrics
//!
//! Lightweight in-process counters using atomics, rendered as plain text
//! in the Prometheus exposition format at `/metrics`.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

/// Shared metrics state.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub records_processed: Arc<AtomicU64>,
}

impl ApiMetrics {
    /// Create a new metrics instance.
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            records_processed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return current request count.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Return current error count.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Return the number of records handed to the engine so far.
    pub fn records(&self) -> u64 {
        self.records_processed.load(Ordering::Relaxed)
    }

    /// Count a batch of records accepted by a statistics endpoint.
    pub fn record_batch(&self, len: usize) {
        self.records_processed
            .fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Render all counters in the Prometheus text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, help, value) in [
            ("wellstat_http_requests_total", "HTTP requests served.", self.requests()),
            ("wellstat_http_errors_total", "HTTP responses with a 4xx or 5xx status.", self.errors()),
            ("wellstat_records_processed_total", "Records submitted for analysis.", self.records()),
        ] {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "# HELP {name} {help}");
            let _ = writeln!(out, "# TYPE {name} counter");
            let _ = writeln!(out, "{name} {value}");
        }
        out
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if response.status().is_server_error() || response.status().is_client_error() {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    response
}

/// GET /metrics — Counter snapshot in text exposition format.
pub async fn metrics_handler(Extension(metrics): Extension<ApiMetrics>) -> String {
    metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
        assert_eq!(m.records(), 0);
    }

    #[test]
    fn clones_share_counters() {
        let m = ApiMetrics::new();
        let clone = m.clone();
        clone.record_batch(7);
        m.record_batch(3);
        assert_eq!(m.records(), 10);
    }

    #[test]
    fn render_lists_every_counter() {
        let m = ApiMetrics::new();
        m.request_count.fetch_add(4, Ordering::Relaxed);
        let text = m.render();
        assert!(text.contains("wellstat_http_requests_total 4"));
        assert!(text.contains("wellstat_http_errors_total 0"));
        assert!(text.contains("# TYPE wellstat_records_processed_total counter"));
    }
}

//! Prometheus metrics for page-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const HTTP_REQUESTS_TOTAL: &str = "pagecraft_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "pagecraft_http_request_duration_seconds";
const PAGES_RENDERED_TOTAL: &str = "pagecraft_pages_rendered_total";
const COMPONENTS_SKIPPED_TOTAL: &str = "pagecraft_components_skipped_total";
const PAGE_SAVES_TOTAL: &str = "pagecraft_page_saves_total";
const PAGES_STORED: &str = "pagecraft_pages_stored";
const VALIDATION_FAILURES_TOTAL: &str = "pagecraft_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record an HTTP request.
///
/// # Arguments
///
/// * `method` - HTTP method (GET, PUT, etc.)
/// * `path` - Matched route
/// * `status` - HTTP status code
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Record a page render.
///
/// # Arguments
///
/// * `mode` - "display" or "author"
/// * `skipped` - Components dropped because their type is unknown
pub fn record_page_render(mode: &str, skipped: usize) {
    counter!(PAGES_RENDERED_TOTAL, "mode" => mode.to_string()).increment(1);
    if skipped > 0 {
        counter!(COMPONENTS_SKIPPED_TOTAL).increment(skipped as u64);
    }
}

/// Record a save.
///
/// # Arguments
///
/// * `outcome` - "success" or "failure"
pub fn record_page_save(outcome: &str) {
    counter!(PAGE_SAVES_TOTAL, "outcome" => outcome.to_string()).increment(1);
}

/// Update the stored page count.
#[allow(clippy::cast_precision_loss)]
pub fn set_pages_stored(count: usize) {
    gauge!(PAGES_STORED).set(count as f64);
}

/// Record an input validation failure.
///
/// # Arguments
///
/// * `validation_type` - Type of validation that failed (page_id, slug, component_id, etc.)
pub fn record_validation_failure(validation_type: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type.to_string()
    )
    .increment(1);
}

//! Prometheus metrics for the cipher service.
//!
//! Metrics are exposed via a dedicated HTTP listener when `METRICS_PORT` is
//! non-zero. Recording functions are safe to call when no exporter is
//! installed; they do nothing.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `caesar_requests_total` - Requests served (labels: operation, status)
//! - `caesar_bytes_transformed_total` - Bytes written by finished transforms (label: operation)
//! - `caesar_keys_recovered_total` - Keys recovered without being given (label: method)
//!
//! ## Histograms
//! - `caesar_request_duration_seconds` - Time to response head (labels: operation, status)
//!
//! ## Gauges
//! - `caesar_transforms_in_flight` - Transforms currently streaming
//!
//! # Usage
//!
//! ```rust,ignore
//! use caesar_service::metrics::{init_metrics, record_request};
//!
//! init_metrics("0.0.0.0:9090".parse()?)?;
//! record_request("encode", 200, 0.002);
//! ```

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "caesar_requests_total";
    pub const REQUEST_DURATION_SECONDS: &str = "caesar_request_duration_seconds";
    pub const BYTES_TRANSFORMED_TOTAL: &str = "caesar_bytes_transformed_total";
    pub const KEYS_RECOVERED_TOTAL: &str = "caesar_keys_recovered_total";
    pub const TRANSFORMS_IN_FLIGHT: &str = "caesar_transforms_in_flight";
}

/// Initialize the Prometheus metrics exporter.
///
/// Starts the Prometheus HTTP listener on `metrics_addr` and registers
/// metric descriptions.
///
/// # Errors
///
/// Returns a message if the exporter cannot be installed, e.g. the address
/// is taken or a recorder is already set.
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(names::REQUESTS_TOTAL, "Total number of cipher requests served");
    describe_counter!(
        names::BYTES_TRANSFORMED_TOTAL,
        "Total number of bytes written by completed transforms"
    );
    describe_counter!(
        names::KEYS_RECOVERED_TOTAL,
        "Total number of keys recovered by brute force or frequency analysis"
    );
    describe_histogram!(
        names::REQUEST_DURATION_SECONDS,
        "Time from request to response head in seconds"
    );
    describe_gauge!(
        names::TRANSFORMS_IN_FLIGHT,
        "Number of transforms currently streaming"
    );

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a served request and its time to response head.
pub fn record_request(operation: &'static str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    counter!(names::REQUESTS_TOTAL, "operation" => operation, "status" => status.clone())
        .increment(1);
    histogram!(names::REQUEST_DURATION_SECONDS, "operation" => operation, "status" => status)
        .record(duration_secs);
}

/// Record the output size of a completed transform.
pub fn record_bytes_transformed(operation: &'static str, bytes: u64) {
    counter!(names::BYTES_TRANSFORMED_TOTAL, "operation" => operation).increment(bytes);
}

/// Record a key recovered without being given.
pub fn record_key_recovered(method: &'static str) {
    counter!(names::KEYS_RECOVERED_TOTAL, "method" => method).increment(1);
}

/// Track a transform entering (`true`) or leaving (`false`) the streaming state.
pub fn set_transform_in_flight(started: bool) {
    let gauge = gauge!(names::TRANSFORMS_IN_FLIGHT);
    if started {
        gauge.increment(1.0);
    } else {
        gauge.decrement(1.0);
    }
}

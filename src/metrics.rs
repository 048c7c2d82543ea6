use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "presupuesto_requests_total",
        "Total number of API requests per endpoint"
    );
    describe_counter!(
        "presupuesto_errors_total",
        "Total number of errors by error type"
    );
    describe_histogram!(
        "presupuesto_request_duration_seconds",
        "Request duration in seconds per endpoint"
    );
    describe_gauge!(
        "presupuesto_api_info",
        "API version and build information"
    );

    gauge!("presupuesto_api_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a request
pub fn record_request(endpoint: &str) {
    counter!(
        "presupuesto_requests_total",
        "endpoint" => endpoint.to_string(),
    )
    .increment(1);
}

/// Record request duration
pub fn record_duration(endpoint: &str, duration: Duration) {
    histogram!(
        "presupuesto_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(error_type: &str) {
    counter!(
        "presupuesto_errors_total",
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

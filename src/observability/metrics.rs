//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define the service instruments and their labels
//! - Accept counter/histogram updates from handlers and middleware
//! - Render the Prometheus text exposition format on demand
//!
//! # Metrics
//! - `checkouts_total` (counter): checkout attempts by `payment_method`
//! - `http_request_duration_ms` (histogram): latency by `method`, `route`, `code`
//! - `process_*` (gauges): process defaults, see `observability::process`
//!
//! # Design Decisions
//! - The recorder is owned, not installed globally: every `MetricsRegistry`
//!   is an independent registry shared by handle
//! - Updates are atomic inside the exporter, so concurrent writers combine
//! - Histogram buckets come from configuration

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

use crate::checkout::PaymentMethod;
use crate::config::MetricsConfig;

pub const CHECKOUTS_TOTAL: &str = "checkouts_total";
pub const HTTP_REQUEST_DURATION_MS: &str = "http_request_duration_ms";

pub const PROCESS_START_TIME_SECONDS: &str = "process_start_time_seconds";
pub const PROCESS_RESIDENT_MEMORY_BYTES: &str = "process_resident_memory_bytes";
pub const PROCESS_VIRTUAL_MEMORY_BYTES: &str = "process_virtual_memory_bytes";
pub const PROCESS_CPU_USAGE_PERCENT: &str = "process_cpu_usage_percent";

/// Content type of the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Shared handle to the service's metrics registry.
#[derive(Clone)]
pub struct MetricsRegistry {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    /// Build a registry with the configured latency buckets and register
    /// instrument descriptions.
    pub fn new(config: &MetricsConfig) -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION_MS.to_string()),
                &config.duration_buckets_ms,
            )?
            .build_recorder();
        let handle = recorder.handle();

        let registry = Self {
            recorder: Arc::new(recorder),
            handle,
        };
        registry.describe();
        Ok(registry)
    }

    fn describe(&self) {
        self.with_recorder(|| {
            describe_counter!(CHECKOUTS_TOTAL, "Total number of checkouts");
            describe_histogram!(HTTP_REQUEST_DURATION_MS, "Duration of HTTP requests in ms");
            describe_gauge!(
                PROCESS_START_TIME_SECONDS,
                "Start time of the process since unix epoch in seconds"
            );
            describe_gauge!(PROCESS_RESIDENT_MEMORY_BYTES, "Resident memory size in bytes");
            describe_gauge!(PROCESS_VIRTUAL_MEMORY_BYTES, "Virtual memory size in bytes");
            describe_gauge!(PROCESS_CPU_USAGE_PERCENT, "Process CPU usage in percent");
        });
    }

    /// Run `f` with this registry as the active recorder for the
    /// `metrics` macros on the current thread.
    pub fn with_recorder<T>(&self, f: impl FnOnce() -> T) -> T {
        metrics::with_local_recorder(&*self.recorder, f)
    }

    /// Count one checkout attempt.
    pub fn record_checkout(&self, method: PaymentMethod) {
        self.with_recorder(|| {
            counter!(CHECKOUTS_TOTAL, "payment_method" => method.as_str()).increment(1);
        });
    }

    /// Record one request duration in milliseconds.
    pub fn observe_request(&self, method: &str, route: &str, code: u16, elapsed: Duration) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.with_recorder(|| {
            histogram!(
                HTTP_REQUEST_DURATION_MS,
                "method" => method.to_string(),
                "route" => route.to_string(),
                "code" => code.to_string()
            )
            .record(elapsed_ms);
        });
    }

    /// Set a process-level gauge.
    pub fn set_process_gauge(&self, name: &'static str, value: f64) {
        self.with_recorder(|| gauge!(name).set(value));
    }

    /// Render every instrument in the text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Periodic exporter maintenance.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry").finish_non_exhaustive()
    }
}

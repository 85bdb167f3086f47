//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the checkout simulator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Randomized outcome and latency shape.
    pub simulation: SimulationConfig,

    /// Metrics registry settings.
    pub metrics: MetricsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// Listen port, overridable with `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3003,
        }
    }
}

/// Parameters of the synthetic transaction engine.
///
/// A roll is a uniform integer in `[0, roll_max]`. A checkout pays by card
/// when its roll is above `card_threshold` and fails when its (independent)
/// roll is at or below `error_threshold`. With the defaults both splits are
/// roughly 80/20, which existing dashboards are calibrated against.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub roll_max: u32,
    pub card_threshold: u32,
    pub error_threshold: u32,

    /// Upper bound of the random part of a checkout delay.
    pub checkout_jitter_max_ms: u32,

    /// Upper bound of the root handler delay.
    pub echo_max_delay_ms: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            roll_max: 100,
            card_threshold: 20,
            error_threshold: 20,
            checkout_jitter_max_ms: 100,
            echo_max_delay_ms: 400,
        }
    }
}

/// Metrics registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Bucket upper bounds for `http_request_duration_ms`.
    pub duration_buckets_ms: Vec<f64>,

    /// Collect process-level gauges in the background.
    pub process_metrics: bool,

    /// Seconds between process metric samples.
    pub process_interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            duration_buckets_ms: vec![0.1, 5.0, 15.0, 50.0, 100.0, 200.0, 300.0, 400.0, 500.0],
            process_metrics: true,
            process_interval_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Console output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

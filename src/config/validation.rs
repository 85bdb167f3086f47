//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. Returns every violation, not
//! just the first, and runs before a config is accepted.

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("simulation.roll_max must be greater than 0")]
    ZeroRollMax,

    #[error("simulation.{name} ({value}) exceeds simulation.roll_max ({roll_max})")]
    ThresholdOutOfRange {
        name: &'static str,
        value: u32,
        roll_max: u32,
    },

    #[error("metrics.duration_buckets_ms must not be empty")]
    NoBuckets,

    #[error("metrics.duration_buckets_ms must be finite and strictly increasing (offending value: {0})")]
    UnorderedBuckets(f64),

    #[error("metrics.process_interval_secs must be greater than 0")]
    ZeroProcessInterval,
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let sim = &config.simulation;

    if sim.roll_max == 0 {
        errors.push(ValidationError::ZeroRollMax);
    }
    for (name, value) in [
        ("card_threshold", sim.card_threshold),
        ("error_threshold", sim.error_threshold),
    ] {
        if value > sim.roll_max {
            errors.push(ValidationError::ThresholdOutOfRange {
                name,
                value,
                roll_max: sim.roll_max,
            });
        }
    }

    let buckets = &config.metrics.duration_buckets_ms;
    if buckets.is_empty() {
        errors.push(ValidationError::NoBuckets);
    }
    let mut previous = f64::NEG_INFINITY;
    for &bound in buckets {
        if !bound.is_finite() || bound <= previous {
            errors.push(ValidationError::UnorderedBuckets(bound));
            break;
        }
        previous = bound;
    }

    if config.metrics.process_metrics && config.metrics.process_interval_secs == 0 {
        errors.push(ValidationError::ZeroProcessInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

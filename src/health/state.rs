//! Application health flag.
//!
//! # States
//! - Healthy: `/healthz` answers ok
//! - Unhealthy: `/healthz` fails until the process restarts
//!
//! # State Transitions
//! ```text
//! Healthy → Unhealthy: admin break request
//! Unhealthy → Healthy: never (restart only)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide health flag, shared by `Arc` with the handlers.
#[derive(Debug)]
pub struct HealthState {
    healthy: AtomicBool,
}

impl HealthState {
    /// Create a new flag in the healthy state.
    pub fn new() -> Self {
        Self {
            healthy: AtomicBool::new(true),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }

    /// Mark the application unhealthy.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// flag was already down.
    pub fn mark_unhealthy(&self) -> bool {
        self.healthy.swap(false, Ordering::AcqRel)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

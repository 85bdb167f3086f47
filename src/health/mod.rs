//! Application health subsystem.
//!
//! A single monotone flag read by `GET /healthz` and lowered by
//! `GET /bad-health`. The flag lives in `AppState`, not in a global.

pub mod state;

pub use state::HealthState;

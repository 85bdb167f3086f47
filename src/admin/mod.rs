//! Health check and administrative routes.
//!
//! Unauthenticated: the service is a demo workload, not a real system.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::{bad_health, healthz};
use crate::http::server::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/bad-health", get(bad_health))
}

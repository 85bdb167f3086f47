use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

/// `GET /healthz`
pub async fn healthz(State(state): State<AppState>) -> Result<Json<HealthStatus>, AppError> {
    if state.health.is_healthy() {
        Ok(Json(HealthStatus {
            status: "ok".to_string(),
        }))
    } else {
        Err(AppError::Unhealthy)
    }
}

/// `GET /bad-health`: lower the health flag for the rest of the process
/// lifetime. Repeating the call changes nothing.
pub async fn bad_health(State(state): State<AppState>) -> Json<HealthStatus> {
    if state.health.mark_unhealthy() {
        tracing::warn!("App health set to 'false'");
    }

    Json(HealthStatus {
        status: "App health set to 'false'".to_string(),
    })
}

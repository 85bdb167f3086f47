//! Terminal error boundary.
//!
//! Every handler failure ends here. The boundary never retries and never
//! looks at the kind of error beyond its message: the answer is always a
//! 500 with `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::checkout::TransactionStatus;

#[derive(Debug, Error)]
pub enum AppError {
    /// Synthetic checkout failure.
    #[error("{}", .0.message())]
    Transaction(TransactionStatus),

    /// `/healthz` polled after the flag went down.
    #[error("Application unhealthy")]
    Unhealthy,

    /// Anything else, including panics caught in the stack.
    #[error("{0}")]
    Unhandled(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        tracing::debug!(error = %error, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
    }
}

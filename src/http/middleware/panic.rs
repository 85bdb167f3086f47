//! Converts handler panics into the terminal error response.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::http::error::AppError;

/// Response builder for `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unhandled fault".to_string()
    };

    tracing::error!(error = %message, "Handler panicked");
    AppError::Unhandled(message).into_response()
}

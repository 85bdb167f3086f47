//! Request timing middleware.
//!
//! Takes a start reading before dispatch and records one
//! `http_request_duration_ms` observation after the response is final,
//! whatever path produced it. Errors and caught panics reach this layer as
//! ordinary 500 responses, so they are timed like everything else.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::observability::MetricsRegistry;

/// Route label for requests no route matched.
pub const UNMATCHED_ROUTE: &str = "__unmatched__";

pub async fn instrument_middleware(
    State(metrics): State<MetricsRegistry>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let code = response.status().as_u16();
    metrics.observe_request(&method, &route, code, elapsed);

    tracing::debug!(
        method = %method,
        route = %route,
        code,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Request timed"
    );

    response
}

fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

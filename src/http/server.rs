//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timing, panic catcher)
//! - Start background tasks (process metrics)
//! - Serve until the shutdown coordinator fires

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::BuildError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::admin::admin_routes;
use crate::checkout::CheckoutSimulator;
use crate::config::ServiceConfig;
use crate::health::HealthState;
use crate::lifecycle::ShutdownSignal;
use crate::http::checkout::{checkout, root};
use crate::http::exposition::metrics_handler;
use crate::http::middleware::{instrument_middleware, panic_response};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::observability::{MetricsRegistry, ProcessCollector};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub health: Arc<HealthState>,
    pub metrics: MetricsRegistry,
    pub simulator: Arc<CheckoutSimulator>,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Result<Self, BuildError> {
        Ok(Self {
            health: Arc::new(HealthState::new()),
            metrics: MetricsRegistry::new(&config.metrics)?,
            simulator: Arc::new(CheckoutSimulator::new(config.simulation.clone())),
        })
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build metrics registry: {0}")]
    Metrics(#[from] BuildError),
}

/// HTTP server for the checkout simulator.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(Self::routes(), state.clone());

        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Every route the service answers.
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/", get(root))
            .route("/checkout", get(checkout))
            .route("/metrics", get(metrics_handler))
            .merge(admin_routes())
    }

    /// Wrap `routes` in the middleware stack. Outermost first: request ID,
    /// trace span, request ID propagation, timing, panic catcher.
    pub fn build_router(routes: Router<AppState>, state: AppState) -> Router {
        routes
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(
                state.metrics.clone(),
                instrument_middleware,
            ))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        if self.config.metrics.process_metrics {
            let collector = ProcessCollector::new(
                self.state.metrics.clone(),
                Duration::from_secs(self.config.metrics.process_interval_secs),
            );
            tokio::spawn(collector.run(shutdown.clone()));
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Closing listener");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared state, for inspection.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::SimulationConfig;
    use crate::http::middleware::UNMATCHED_ROUTE;

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    fn state_with(simulation: SimulationConfig) -> AppState {
        let config = ServiceConfig {
            simulation,
            ..ServiceConfig::default()
        };
        AppState::new(&config).unwrap()
    }

    fn observations(text: &str, labels: &[&str]) -> u64 {
        text.lines()
            .filter(|l| l.starts_with("http_request_duration_ms_count{"))
            .filter(|l| labels.iter().all(|label| l.contains(label)))
            .filter_map(|l| l.rsplit(' ').next()?.parse::<u64>().ok())
            .sum()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_panic_is_500_and_still_timed() {
        let state = state_with(SimulationConfig::default());
        let app = HttpServer::build_router(
            HttpServer::routes().route("/boom", axum::routing::get(boom)),
            state.clone(),
        );

        let (status, body) = get(app, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "kaboom");

        let text = state.metrics.render();
        assert_eq!(
            observations(&text, &["route=\"/boom\"", "code=\"500\"", "method=\"GET\""]),
            1
        );
    }

    #[tokio::test]
    async fn test_unmatched_route_label() {
        let state = state_with(SimulationConfig::default());
        let app = HttpServer::build_router(HttpServer::routes(), state.clone());

        let (status, _) = get(app, "/no/such/page").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let text = state.metrics.render();
        let label = format!("route=\"{UNMATCHED_ROUTE}\"");
        assert_eq!(observations(&text, &[&label, "code=\"404\""]), 1);
        assert!(!text.contains("/no/such/page"));
    }

    #[tokio::test]
    async fn test_forced_checkout_failure_is_counted_and_timed() {
        let state = state_with(SimulationConfig {
            card_threshold: 100,
            error_threshold: 100,
            ..SimulationConfig::default()
        });
        let app = HttpServer::build_router(HttpServer::routes(), state.clone());

        let (status, body) = get(app, "/checkout?delay=5000").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "RSAP0010E: Severe problem detected");

        let text = state.metrics.render();
        assert!(text.contains("checkouts_total{payment_method=\"paypal\"} 1"));
        assert_eq!(
            observations(&text, &["route=\"/checkout\"", "code=\"500\""]),
            1
        );
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let state = state_with(SimulationConfig::default());
        let app = HttpServer::build_router(HttpServer::routes(), state);

        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_delay_on_success_path_still_approves() {
        let state = state_with(SimulationConfig {
            error_threshold: 0,
            roll_max: 1_000_000,
            ..SimulationConfig::default()
        });
        let app = HttpServer::build_router(HttpServer::routes(), state.clone());

        // error_threshold 0 leaves a one-in-a-million failure chance per draw
        let (status, body) = get(app, "/checkout?delay=1e300").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "RSAP0001I: Transaction OK");
        assert!(body["transactionTime"].as_str().unwrap().ends_with("ms"));

        let text = state.metrics.render();
        assert_eq!(
            observations(&text, &["route=\"/checkout\"", "code=\"200\""]),
            1
        );
    }

    #[tokio::test]
    async fn test_malformed_checkout_query_reaches_boundary_and_counter() {
        let state = state_with(SimulationConfig {
            card_threshold: 100,
            error_threshold: 100,
            ..SimulationConfig::default()
        });
        let app = HttpServer::build_router(HttpServer::routes(), state.clone());

        let (status, body) = get(app, "/checkout?delay=1&delay=2").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "RSAP0010E: Severe problem detected");

        let text = state.metrics.render();
        assert!(text.contains("checkouts_total{payment_method=\"paypal\"} 1"));
        assert_eq!(
            observations(&text, &["route=\"/checkout\"", "code=\"500\""]),
            1
        );
    }
}

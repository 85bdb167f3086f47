//! Synthetic transaction handlers: the root latency echo and `/checkout`.

use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::checkout::{format_transaction_time, CheckoutOutcome, TransactionStatus};
use crate::http::error::AppError;
use crate::http::server::AppState;

/// Success payload of both handlers.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionReceipt {
    pub status: String,
    #[serde(rename = "transactionTime")]
    pub transaction_time: String,
}

/// Query parameters of `/checkout`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutParams {
    /// Base delay in milliseconds, added to the random jitter.
    pub delay: Option<String>,
}

impl CheckoutParams {
    /// The numeric base delay, if the caller supplied a usable one.
    pub fn base_delay_ms(&self) -> Option<f64> {
        let raw = self.delay.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                tracing::warn!(delay = %raw, "Ignoring non-numeric delay parameter");
                None
            }
        }
    }
}

/// `GET /`: wait a random time, then echo it.
pub async fn root(State(state): State<AppState>) -> Json<TransactionReceipt> {
    let delay_ms = state.simulator.echo_delay_ms(&mut rand::thread_rng());

    tokio::time::sleep(Duration::from_millis(u64::from(delay_ms))).await;

    Json(TransactionReceipt {
        status: "ok".to_string(),
        transaction_time: format_transaction_time(f64::from(delay_ms)),
    })
}

/// `GET /checkout`: simulate one order.
///
/// The attempt is counted before the status is acted on, so
/// `checkouts_total` tracks orders placed, failed ones included. A query
/// string that does not deserialize still counts as a checkout, just
/// without a base delay.
pub async fn checkout(
    State(state): State<AppState>,
    query: Result<Query<CheckoutParams>, QueryRejection>,
) -> Result<Json<TransactionReceipt>, AppError> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Ignoring malformed checkout query");
            CheckoutParams::default()
        }
    };

    let outcome = state
        .simulator
        .simulate(&mut rand::thread_rng(), params.base_delay_ms());

    state.metrics.record_checkout(outcome.payment_method);
    log_outcome(&outcome);

    match outcome.status {
        TransactionStatus::SevereProblem => Err(AppError::Transaction(outcome.status)),
        TransactionStatus::Approved => {
            tokio::time::sleep(simulated_wait(outcome.delay_ms)).await;

            Ok(Json(TransactionReceipt {
                status: outcome.status.message().to_string(),
                transaction_time: outcome.transaction_time(),
            }))
        }
    }
}

/// Emit the per-checkout event: error level for failures, info otherwise.
fn log_outcome(outcome: &CheckoutOutcome) {
    let code = outcome.status.code();
    let message = outcome.status.message();

    if outcome.status.is_error() {
        tracing::error!(
            "errorCode" = code,
            "transactionTimeMs" = outcome.delay_ms,
            payment_method = %outcome.payment_method,
            "{}",
            message
        );
    } else {
        tracing::info!(
            "errorCode" = code,
            "transactionTimeMs" = outcome.delay_ms,
            payment_method = %outcome.payment_method,
            "{}",
            message
        );
    }
}

/// Wait for a delay in milliseconds. Delays too large for a `Duration`
/// saturate; tokio parks such deadlines in the far future.
fn simulated_wait(delay_ms: f64) -> Duration {
    Duration::try_from_secs_f64(delay_ms / 1000.0).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::PaymentMethod;
    use serde_json::Value;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a JSON subscriber shaped like the production one and
    /// return the emitted events.
    fn capture_json(f: impl FnOnce()) -> Vec<Value> {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn outcome(status: TransactionStatus, delay_ms: f64) -> CheckoutOutcome {
        CheckoutOutcome {
            payment_method: PaymentMethod::Card,
            status,
            delay_ms,
        }
    }

    fn params(delay: Option<&str>) -> CheckoutParams {
        CheckoutParams {
            delay: delay.map(str::to_string),
        }
    }

    #[test]
    fn test_base_delay_parsing() {
        assert_eq!(params(None).base_delay_ms(), None);
        assert_eq!(params(Some("")).base_delay_ms(), None);
        assert_eq!(params(Some("50")).base_delay_ms(), Some(50.0));
        assert_eq!(params(Some(" 12.5 ")).base_delay_ms(), Some(12.5));
        assert_eq!(params(Some("-5")).base_delay_ms(), Some(-5.0));
        assert_eq!(params(Some("soon")).base_delay_ms(), None);
        assert_eq!(params(Some("inf")).base_delay_ms(), None);
        assert_eq!(params(Some("NaN")).base_delay_ms(), None);
    }

    #[test]
    fn test_receipt_wire_names() {
        let receipt = TransactionReceipt {
            status: "ok".into(),
            transaction_time: "12ms".into(),
        };
        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            serde_json::json!({"status": "ok", "transactionTime": "12ms"})
        );
    }

    #[test]
    fn test_failure_logged_at_error_with_code_and_time() {
        let events = capture_json(|| log_outcome(&outcome(TransactionStatus::SevereProblem, 42.0)));

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event["level"], "ERROR");
        assert_eq!(event["errorCode"], "RSAP0010E");
        assert_eq!(event["transactionTimeMs"], 42.0);
        assert_eq!(event["message"], "RSAP0010E: Severe problem detected");
        assert!(event.get("error_code").is_none());
    }

    #[test]
    fn test_success_logged_at_info_with_code_and_time() {
        let events = capture_json(|| log_outcome(&outcome(TransactionStatus::Approved, 57.5)));

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["errorCode"], "RSAP0001I");
        assert_eq!(event["transactionTimeMs"], 57.5);
        assert_eq!(event["message"], "RSAP0001I: Transaction OK");
        assert_eq!(event["payment_method"], "card");
    }

    #[test]
    fn test_simulated_wait_saturates() {
        assert_eq!(simulated_wait(1_500.0), Duration::from_millis(1_500));
        assert_eq!(simulated_wait(0.0), Duration::ZERO);
        assert_eq!(simulated_wait(1e300), Duration::MAX);
        assert_eq!(simulated_wait(f64::MAX), Duration::MAX);
    }
}

//! Checkout simulation types.

use serde::Serialize;

/// How a simulated order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
}

impl PaymentMethod {
    /// Map a roll onto a method: card above the threshold, paypal otherwise.
    pub fn from_roll(roll: u32, card_threshold: u32) -> Self {
        if roll > card_threshold {
            PaymentMethod::Card
        } else {
            PaymentMethod::Paypal
        }
    }

    /// Label value used in `checkouts_total`.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a simulated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Approved,
    SevereProblem,
}

impl TransactionStatus {
    /// Map a roll onto a status: failure at or below the threshold.
    pub fn from_roll(roll: u32, error_threshold: u32) -> Self {
        if roll <= error_threshold {
            TransactionStatus::SevereProblem
        } else {
            TransactionStatus::Approved
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TransactionStatus::Approved => "RSAP0001I",
            TransactionStatus::SevereProblem => "RSAP0010E",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            TransactionStatus::Approved => "RSAP0001I: Transaction OK",
            TransactionStatus::SevereProblem => "RSAP0010E: Severe problem detected",
        }
    }

    pub fn is_error(self) -> bool {
        self == TransactionStatus::SevereProblem
    }
}

/// Everything drawn for one checkout. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutOutcome {
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    /// Simulated processing time, never negative.
    pub delay_ms: f64,
}

impl CheckoutOutcome {
    pub fn transaction_time(&self) -> String {
        format_transaction_time(self.delay_ms)
    }
}

/// Render a delay the way clients see it: `57ms`, `57.5ms`.
pub fn format_transaction_time(delay_ms: f64) -> String {
    format!("{}ms", delay_ms)
}

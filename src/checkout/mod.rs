//! Synthetic checkout transactions.
//!
//! # Data Flow
//! ```text
//! GET /checkout
//!     → engine.rs draws payment method, status and delay
//!     → handler counts the attempt (always, before acting on the status)
//!     → SevereProblem: fail immediately
//!     → Approved: wait out the delay, then respond
//! ```

pub mod engine;
pub mod types;

pub use engine::CheckoutSimulator;
pub use types::{format_transaction_time, CheckoutOutcome, PaymentMethod, TransactionStatus};

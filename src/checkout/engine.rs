//! Core logic for drawing synthetic checkout outcomes.
//!
//! The simulator is pure: it takes a random source and returns values. The
//! HTTP layer owns the side effects (counter, logs, waiting).

use rand::Rng;

use crate::checkout::types::{CheckoutOutcome, PaymentMethod, TransactionStatus};
use crate::config::SimulationConfig;

/// Engine for drawing checkout outcomes and echo delays.
#[derive(Debug, Clone)]
pub struct CheckoutSimulator {
    config: SimulationConfig,
}

impl CheckoutSimulator {
    /// Create a new simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Uniform integer in `[0, roll_max]`.
    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(0..=self.config.roll_max)
    }

    pub fn draw_payment_method<R: Rng + ?Sized>(&self, rng: &mut R) -> PaymentMethod {
        PaymentMethod::from_roll(self.roll(rng), self.config.card_threshold)
    }

    pub fn draw_status<R: Rng + ?Sized>(&self, rng: &mut R) -> TransactionStatus {
        TransactionStatus::from_roll(self.roll(rng), self.config.error_threshold)
    }

    /// Random jitter plus the caller's base delay, clamped at zero.
    pub fn draw_delay_ms<R: Rng + ?Sized>(&self, rng: &mut R, base_delay_ms: Option<f64>) -> f64 {
        let jitter = f64::from(rng.gen_range(0..=self.config.checkout_jitter_max_ms));
        (jitter + base_delay_ms.unwrap_or(0.0)).max(0.0)
    }

    /// Draw a full outcome. Method and status use independent rolls.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R, base_delay_ms: Option<f64>) -> CheckoutOutcome {
        let payment_method = self.draw_payment_method(rng);
        let status = self.draw_status(rng);
        let delay_ms = self.draw_delay_ms(rng, base_delay_ms);

        CheckoutOutcome {
            payment_method,
            status,
            delay_ms,
        }
    }

    /// Delay for the root echo handler, in `[0, echo_max_delay_ms]`.
    pub fn echo_delay_ms<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(0..=self.config.echo_max_delay_ms)
    }
}

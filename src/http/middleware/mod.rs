//! Middleware stages shared by every route.

pub mod instrument;
pub mod panic;

pub use instrument::{instrument_middleware, UNMATCHED_ROUTE};
pub use panic::panic_response;

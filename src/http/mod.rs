//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → middleware/instrument.rs (start timing)
//!     → checkout.rs | exposition.rs | admin handlers
//!     → error.rs (failures become 500 + JSON)
//!     → middleware/instrument.rs (record duration with final status)
//!     → Send to client
//! ```

pub mod checkout;
pub mod error;
pub mod exposition;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};

//! Synthetic checkout service library.
//!
//! An instrumented HTTP workload: every request is timed into a latency
//! histogram, `/checkout` fails or stalls at random while counting orders by
//! payment method, and `/metrics` exposes it all for scraping.

pub mod admin;
pub mod checkout;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};

//! metrika collector library entry.
//!
//! Wires the shared `MetricStore`, ingress handlers, request logging, and
//! config loading into an axum application. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod router;

//! metrika core: metric data model, in-memory store, wire codec, and errors.
//!
//! This crate defines the aggregation semantics and the wire contracts shared
//! by the collector and the agent. It carries no HTTP or runtime dependencies
//! so both sides (and test tooling) can link it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input from the network must surface as `MetrikaError` so the
//! collector never crashes on bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod addr;
pub mod codec;
pub mod error;
pub mod model;
pub mod store;

/// Shared result type.
pub use error::{MetrikaError, Result};
pub use model::{MetricKind, MetricQuery, MetricRecord, MetricValue};
pub use store::{Listing, MetricStore};

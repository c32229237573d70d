//! Request observability.
//!
//! Every request is logged once it has been answered, with method, uri,
//! status and latency, through `tracing`.

pub mod request_log;

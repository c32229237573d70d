//! metrika agent library entry.
//!
//! The agent samples process and host statistics on one cadence and pushes
//! them to a collector on another:
//! - `sampler`  : where readings come from (`Sampler` trait, sysinfo-backed impl)
//! - `snapshot` : the locally held readings plus `PollCount` / `RandomValue`
//! - `reporter` : how a record leaves the process (`Reporter` trait, HTTP impl)
//! - `agent`    : the two scheduled activities and their failure policy

pub mod agent;
pub mod config;
pub mod reporter;
pub mod sampler;
pub mod snapshot;

pub use agent::{Agent, AgentSettings};
pub use reporter::{HttpReporter, Reporter};
pub use sampler::{Sampler, SystemSampler};
pub use snapshot::Snapshot;

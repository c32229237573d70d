//! Shared error type across metrika crates.

use thiserror::Error;

use crate::model::MetricKind;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Value could not be parsed for the declared kind.
    InvalidValue,
    /// Kind is neither `gauge` nor `counter`.
    UnknownKind,
    /// Encoded body is not a well-formed metric.
    MalformedPayload,
    /// Name/kind pair was never updated.
    NotFound,
    /// Listing page could not be rendered.
    RenderFault,
    /// Agent could not deliver a metric.
    Transport,
    /// Invalid startup configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidValue => "INVALID_VALUE",
            ClientCode::UnknownKind => "UNKNOWN_KIND",
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::RenderFault => "RENDER_FAULT",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status a collector answers with for this code.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::InvalidValue | ClientCode::UnknownKind | ClientCode::MalformedPayload => {
                400
            }
            ClientCode::NotFound => 404,
            ClientCode::Transport => 502,
            ClientCode::RenderFault | ClientCode::Config | ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetrikaError>;

/// Unified error type used by the store, codec, collector and agent.
#[derive(Debug, Error)]
pub enum MetrikaError {
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("unknown metric kind: {0}")]
    UnknownKind(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("{kind} metric not found: {name}")]
    NotFound { kind: MetricKind, name: String },
    #[error("render fault: {0}")]
    RenderFault(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetrikaError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetrikaError::InvalidValue(_) => ClientCode::InvalidValue,
            MetrikaError::UnknownKind(_) => ClientCode::UnknownKind,
            MetrikaError::MalformedPayload(_) => ClientCode::MalformedPayload,
            MetrikaError::NotFound { .. } => ClientCode::NotFound,
            MetrikaError::RenderFault(_) => ClientCode::RenderFault,
            MetrikaError::Transport(_) => ClientCode::Transport,
            MetrikaError::Config(_) => ClientCode::Config,
            MetrikaError::Internal(_) => ClientCode::Internal,
        }
    }
}

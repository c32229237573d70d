//! Ingress handlers.
//!
//! - `update`  : path-form and body-form metric updates
//! - `value`   : path-form (plain text) and body-form (JSON) reads
//! - `listing` : HTML page of all non-zero metrics

pub mod listing;
pub mod update;
pub mod value;

use axum::http::{header, HeaderMap};

use metrika_core::codec::{Compression, GZIP};

/// `Content-Encoding` of the request body, if any.
fn content_encoding(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
}

/// Gzip the response when the client lists `gzip` in `Accept-Encoding`.
fn response_compression(headers: &HeaderMap) -> Compression {
    let accepts_gzip = headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| token.split(';').next())
        .any(|coding| coding.trim().eq_ignore_ascii_case(GZIP));
    if accepts_gzip {
        Compression::Gzip
    } else {
        Compression::Identity
    }
}

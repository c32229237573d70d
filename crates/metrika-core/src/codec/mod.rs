//! Reporting codec.
//!
//! Two encodings of a metric update:
//! - Body form: one JSON object (`{id, type, value|delta}`), optionally wrapped
//!   in a gzip envelope and flagged through a content-encoding value.
//! - Path form: `(kind, name, value)` taken from URL segments, value parsed per
//!   kind.
//!
//! All decoders are panic-free: malformed input is reported as `MetrikaError`
//! so a collector stays up under hostile or broken traffic.

pub mod json;
pub mod path;

pub use json::{
    decode, decode_query, encode, encode_query, Compression, Payload, GZIP, MAX_DECODED_BYTES,
};
pub use path::{format_value, parse_kind, parse_update, parse_value};

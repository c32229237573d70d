use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use metrika_core::codec;

use super::{content_encoding, response_compression};
use crate::app_state::AppState;
use crate::error::ApiResult;

/// `GET /value/:kind/:name` answers the bare value as `text/plain`.
pub async fn value_from_path(
    State(state): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> ApiResult<String> {
    let kind = codec::parse_kind(&kind)?;
    let record = state.store().lookup(kind, &name)?;
    Ok(codec::format_value(record.value))
}

/// `POST /value/` with a `{id, type}` body answers the full record as JSON.
pub async fn value_from_body(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let query = codec::decode_query(&body, content_encoding(&headers))?;
    let record = state.store().lookup(query.kind, &query.id)?;
    let payload = codec::encode(&record, response_compression(&headers))?;

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload.body,
    )
        .into_response();
    if let Some(enc) = payload.content_encoding {
        response
            .headers_mut()
            .insert(header::CONTENT_ENCODING, HeaderValue::from_static(enc));
    }
    Ok(response)
}

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use bytes::Bytes;

use metrika_core::codec;

use super::content_encoding;
use crate::app_state::AppState;
use crate::error::ApiResult;

/// `POST /update/:kind/:name/:value`
pub async fn update_from_path(
    State(state): State<AppState>,
    Path((kind, name, value)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    let record = codec::parse_update(&kind, &name, &value)?;
    state.store().apply(&record);
    Ok(StatusCode::OK)
}

/// `POST /update/` with a JSON (optionally gzip) `MetricRecord` body.
pub async fn update_from_body(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let record = codec::decode(&body, content_encoding(&headers))?;
    state.store().apply(&record);
    Ok(StatusCode::OK)
}

use askama::Template;
use axum::{extract::State, response::Html};

use metrika_core::codec::format_value;
use metrika_core::{MetricValue, MetrikaError};

use crate::app_state::AppState;
use crate::error::ApiResult;

/// Listing page; names and values are HTML-escaped by askama.
#[derive(Template)]
#[template(path = "metrics.html")]
struct MetricsPage {
    gauges: Vec<(String, String)>,
    counters: Vec<(String, String)>,
}

/// `GET /`
pub async fn list_metrics(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let listing = state.store().list_all();
    let page = MetricsPage {
        gauges: listing
            .gauges
            .into_iter()
            .map(|(name, v)| (name, format_value(MetricValue::Gauge(v))))
            .collect(),
        counters: listing
            .counters
            .into_iter()
            .map(|(name, d)| (name, format_value(MetricValue::Counter(d))))
            .collect(),
    };
    let html = page
        .render()
        .map_err(|e| MetrikaError::RenderFault(e.to_string()))?;
    Ok(Html(html))
}

//! Axum router wiring (update, value, listing).

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, obs};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::listing::list_metrics))
        .route("/update", post(handlers::update::update_from_body))
        .route("/update/", post(handlers::update::update_from_body))
        .route("/update/:kind/:name/:value", post(handlers::update::update_from_path))
        .route("/value", post(handlers::value::value_from_body))
        .route("/value/", post(handlers::value::value_from_body))
        .route("/value/:kind/:name", get(handlers::value::value_from_path))
        .layer(middleware::from_fn(obs::request_log::log_requests))
        .with_state(state)
}

//! HTTP surface tests against the router (tower `oneshot`, no socket).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::{Read, Write};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use metrika_core::MetricStore;
use metrika_server::{app_state::AppState, router::build_router};

fn app() -> (Router, Arc<MetricStore>) {
    let store = Arc::new(MetricStore::new());
    (build_router(AppState::new(Arc::clone(&store))), store)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let encoding = resp
        .headers()
        .get(header::CONTENT_ENCODING)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec(), encoding)
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

#[tokio::test]
async fn path_gauge_update_is_last_write_wins() {
    let (app, _) = app();
    let (s, body, _) = send(&app, post("/update/gauge/Temp/36.6", Body::empty())).await;
    assert_eq!(s, StatusCode::OK);
    assert!(body.is_empty());
    send(&app, post("/update/gauge/Temp/37.1", Body::empty())).await;

    let (s, body, _) = send(&app, get("/value/gauge/Temp")).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, b"37.1");
}

#[tokio::test]
async fn path_counter_update_accumulates() {
    let (app, _) = app();
    send(&app, post("/update/counter/Hits/5", Body::empty())).await;
    send(&app, post("/update/counter/Hits/3", Body::empty())).await;

    let (s, body, _) = send(&app, get("/value/counter/Hits")).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, b"8");
}

#[tokio::test]
async fn unknown_kind_is_bad_request() {
    let (app, store) = app();
    let (s, body, _) = send(&app, post("/update/histogram/Lat/1", Body::empty())).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["error"], "UNKNOWN_KIND");
    assert!(store.is_empty());

    let (s, _, _) = send(&app, get("/value/histogram/Lat")).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_value_is_bad_request() {
    let (app, store) = app();
    let (s, body, _) = send(&app, post("/update/gauge/Temp/abc", Body::empty())).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["error"], "INVALID_VALUE");

    let (s, _, _) = send(&app, post("/update/counter/Hits/1.5", Body::empty())).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn never_set_metric_is_not_found() {
    let (app, store) = app();
    let (s, _, _) = send(&app, get("/value/gauge/neverSet")).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    store.update_counter("OnlyCounter", 1);
    let (s, _, _) = send(&app, get("/value/gauge/OnlyCounter")).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (s, _, _) = send(&app, post("/value/", r#"{"id":"neverSet","type":"counter"}"#)).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn body_update_plain_and_gzip() {
    let (app, store) = app();
    let (s, _, _) = send(&app, post("/update/", r#"{"id":"Temp","type":"gauge","value":36.6}"#)).await;
    assert_eq!(s, StatusCode::OK);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/update/")
        .header(header::CONTENT_ENCODING, "gzip")
        .body(Body::from(gzip(br#"{"id":"PollCount","type":"counter","delta":4}"#)))
        .unwrap();
    let (s, _, _) = send(&app, req).await;
    assert_eq!(s, StatusCode::OK);

    assert_eq!(store.get_gauge("Temp").unwrap(), 36.6);
    assert_eq!(store.get_counter("PollCount").unwrap(), 4);
}

#[tokio::test]
async fn body_update_rejects_malformed() {
    let (app, store) = app();
    for body in [
        "not json",
        r#"{"id":"Temp","type":"histogram","value":1}"#,
        r#"{"id":"Temp","type":"gauge"}"#,
        r#"{"id":"Hits","type":"counter","value":1.0}"#,
    ] {
        let (s, resp, _) = send(&app, post("/update/", body)).await;
        assert_eq!(s, StatusCode::BAD_REQUEST, "{body}");
        let err: Value = serde_json::from_slice(&resp).unwrap();
        assert_eq!(err["error"], "MALFORMED_PAYLOAD", "{body}");
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn body_value_returns_record() {
    let (app, store) = app();
    store.update_counter("Hits", 5);
    store.update_counter("Hits", 3);

    let (s, body, enc) = send(&app, post("/value/", r#"{"id":"Hits","type":"counter"}"#)).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(enc, None);
    let rec: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(rec["id"], "Hits");
    assert_eq!(rec["type"], "counter");
    assert_eq!(rec["delta"], 8);
    assert!(rec.get("value").is_none());
}

#[tokio::test]
async fn body_value_honours_accept_encoding() {
    let (app, store) = app();
    store.update_gauge("Temp", 37.1);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/value/")
        .header(header::ACCEPT_ENCODING, "br, gzip;q=0.8")
        .body(Body::from(r#"{"id":"Temp","type":"gauge"}"#))
        .unwrap();
    let (s, body, enc) = send(&app, req).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(enc.as_deref(), Some("gzip"));

    let mut json = String::new();
    flate2::read::GzDecoder::new(&body[..]).read_to_string(&mut json).unwrap();
    let rec: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rec["value"], 37.1);
}

#[tokio::test]
async fn body_value_rejects_bad_query() {
    let (app, _) = app();
    let (s, _, _) = send(&app, post("/value/", "{")).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_shows_non_zero_entries_sorted() {
    let (app, store) = app();
    store.update_gauge("Zeta", 2.5);
    store.update_gauge("Alpha", 1.0);
    store.update_gauge("Idle", 0.0);
    store.update_counter("Hits", 8);
    store.update_gauge("<script>", 1.0);

    let (s, body, _) = send(&app, get("/")).await;
    assert_eq!(s, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();

    let alpha = html.find("<b>Alpha</b>: 1").expect("Alpha listed");
    let zeta = html.find("<b>Zeta</b>: 2.5").expect("Zeta listed");
    assert!(alpha < zeta);
    assert!(html.contains("<b>Hits</b>: 8"));
    assert!(!html.contains("Idle"));
    assert!(!html.contains("<b><script></b>"));

    // Hidden from the listing, still readable by name.
    let (s, body, _) = send(&app, get("/value/gauge/Idle")).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, b"0");
}

#[tokio::test]
async fn concurrent_requests_share_one_store() {
    let (app, store) = app();
    let mut tasks = Vec::new();
    for _ in 0..64 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let (s, _, _) = send(&app, post("/update/counter/Requests/1", Body::empty())).await;
            assert_eq!(s, StatusCode::OK);
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
    assert_eq!(store.get_counter("Requests").unwrap(), 64);
}

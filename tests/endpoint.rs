//! End-to-end tests of the `/get_sunrise_sunset` endpoint.
//!
//! Drives the real router with `tower::ServiceExt::oneshot` against
//! `wiremock` stand-ins for the three upstream services. Each test mounts
//! only the upstreams its scenario reaches.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sundial::geocode::{ForwardGeocoder, ReverseGeocoder};
use sundial::server::{build_router, AppState};
use sundial::suntimes::SunTimesClient;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Router whose three clients all point at `base`, under distinct paths.
fn app_against(base: &str) -> Router {
    let state = Arc::new(AppState {
        forward: ForwardGeocoder::with_endpoint("oc-test-key", format!("{base}/geocode")),
        reverse: ReverseGeocoder::with_endpoint("g-test-key", format!("{base}/reverse")),
        sun: SunTimesClient::with_endpoint(format!("{base}/sun")),
    });
    build_router(state)
}

/// Router for scenarios that never reach an upstream.
fn app_without_upstreams() -> Router {
    app_against("http://127.0.0.1:1")
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

/// `hh:mm AM/PM`, zero-padded, no seconds.
fn is_local_clock(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 8
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
        && b[5] == b' '
        && (s.ends_with("AM") || s.ends_with("PM"))
}

async fn mount_geocode_japan(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [{
                "geometry": { "lat": 35.6828387, "lng": 139.7594549 },
                "annotations": { "timezone": { "name": "Asia/Tokyo" } }
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_sun_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sun"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "results": {
                "sunrise": "7:26:03 PM",
                "sunset": "9:51:16 AM",
                "day_length": "14:25:13"
            }
        })))
        .mount(server)
        .await;
}

async fn mount_reverse_tokyo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "results": [{
                "address_components": [
                    { "long_name": "Chiyoda", "short_name": "Chiyoda", "types": ["locality", "political"] },
                    { "long_name": "Tokyo", "short_name": "Tokyo", "types": ["administrative_area_level_1", "political"] }
                ]
            }]
        })))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn missing_both_parameters_is_400_with_literal_message() {
    let (status, body) = get(app_without_upstreams(), "/get_sunrise_sunset").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Date and country are required parameters." })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_country_is_400() {
    let (status, body) = get(app_without_upstreams(), "/get_sunrise_sunset?date=2024-06-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date and country are required parameters.");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_date_is_400() {
    let (status, body) = get(app_without_upstreams(), "/get_sunrise_sunset?country=Japan").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date and country are required parameters.");
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_country_is_400() {
    let (status, body) = get(
        app_without_upstreams(),
        "/get_sunrise_sunset?date=2024-06-01&country=%20",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date and country are required parameters.");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_date_is_400() {
    let (status, body) = get(
        app_without_upstreams(),
        "/get_sunrise_sunset?date=June-1&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(
        message.starts_with("Invalid date"),
        "unexpected message: {message}"
    );
}

// ---------------------------------------------------------------------------
// Geocoding outcomes
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_country_is_200_with_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .mount(&server)
        .await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Nowhereland",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "error": "Unable to geocode the selected country" })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn geocoder_outage_is_502() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Geocoding failed"));
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn japan_scenario_returns_local_times_and_place_name() {
    let server = MockServer::start().await;
    mount_geocode_japan(&server).await;
    mount_sun_ok(&server).await;
    mount_reverse_tokyo(&server).await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // UTC 7:26:03 PM / 9:51:16 AM shifted by Asia/Tokyo's +09:00.
    assert_eq!(body["sunrise"], "04:26 AM");
    assert_eq!(body["sunset"], "06:51 PM");
    assert_eq!(body["city"], "Chiyoda");
    assert_eq!(body["state"], "Tokyo");

    assert!(is_local_clock(body["sunrise"].as_str().unwrap()));
    assert!(is_local_clock(body["sunset"].as_str().unwrap()));
}

#[tokio::test(flavor = "multi_thread")]
async fn reverse_geocoder_outage_degrades_to_no_place_name() {
    let server = MockServer::start().await;
    mount_geocode_japan(&server).await;
    mount_sun_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sunrise"], "04:26 AM");
    assert_eq!(body["sunset"], "06:51 PM");

    let keys = body.as_object().unwrap();
    assert!(!keys.contains_key("city"), "city must be omitted, not empty");
    assert!(!keys.contains_key("state"), "state must be omitted, not empty");
}

#[tokio::test(flavor = "multi_thread")]
async fn reverse_geocoder_zero_results_omits_place_name_keys() {
    let server = MockServer::start().await;
    mount_geocode_japan(&server).await;
    mount_sun_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let keys = body.as_object().unwrap();
    assert!(!keys.contains_key("city"));
    assert!(!keys.contains_key("state"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sun_service_outage_is_502() {
    let server = MockServer::start().await;
    mount_geocode_japan(&server).await;

    Mock::given(method("GET"))
        .and(path("/sun"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, body) = get(
        app_against(&server.uri()),
        "/get_sunrise_sunset?date=2024-06-01&country=Japan",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Sunrise/sunset lookup failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_request_yields_identical_payload() {
    let server = MockServer::start().await;
    mount_geocode_japan(&server).await;
    mount_sun_ok(&server).await;
    mount_reverse_tokyo(&server).await;

    let app = app_against(&server.uri());
    let uri = "/get_sunrise_sunset?date=2024-06-01&country=Japan";

    let (first_status, first_body) = get(app.clone(), uri).await;
    let (second_status, second_body) = get(app, uri).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first_status, second_status);
    assert_eq!(first_body, second_body);
}

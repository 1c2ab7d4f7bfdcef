//! HTTP surface tests, driving the axum router directly

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;
use http_body_util::BodyExt;
use skycast::{WeatherService, web};
use tower::ServiceExt;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn app(server: &MockServer) -> Router {
    let service = WeatherService::new(&weather_config(server)).unwrap();
    web::app(Arc::new(service), "assets")
}

async fn mount_city(server: &MockServer, name: &str, latitude: f64, longitude: f64) {
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("name", name))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(geocoding_body(latitude, longitude)),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .and(query_param("latitude", latitude.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(reverse_body(name, "Somewhere")))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, temperature: f64) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(temperature, 5)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_index_serves_page_shell() {
    let server = MockServer::start().await;

    let response = app(&server)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"id="cityInput""#));
    assert!(html.contains(r#"id="dashboard""#));
    assert!(html.contains(r#"id="errorTemplate""#));
    assert!(html.contains("/static/dashboard.js"));
}

#[tokio::test]
async fn test_index_does_not_show_other_clients_search() {
    let server = MockServer::start().await;
    mount_city(&server, "Berlin", 52.52, 13.41).await;
    mount_forecast(&server, 16.4).await;
    let app = app(&server);

    let response = app
        .clone()
        .oneshot(form("/api/search", "city=Berlin"))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("<h1>Berlin</h1>"));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("Berlin"));
    assert!(html.contains("Loading weather data..."));
}

#[tokio::test]
async fn test_search_with_blank_city_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(form("/api/search", "city=+++"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_text(response).await, "Enter a city name first!");
}

#[tokio::test]
async fn test_search_returns_rendered_dashboard() {
    let server = MockServer::start().await;
    mount_city(&server, "Berlin", 52.52, 13.41).await;
    mount_forecast(&server, 16.4).await;

    let response = app(&server)
        .oneshot(form("/api/search", "city=Berlin"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Berlin</h1>"));
    assert!(html.contains(r#"<div class="temperature">16°C</div>"#));
}

#[tokio::test]
async fn test_concurrent_searches_answer_their_own_city() {
    let server = MockServer::start().await;
    mount_city(&server, "Berlin", 52.52, 13.41).await;
    mount_city(&server, "Oslo", 59.91, 10.75).await;
    mount_forecast(&server, 12.0).await;
    let app = app(&server);

    let (berlin, oslo) = futures::join!(
        app.clone().oneshot(form("/api/search", "city=Berlin")),
        app.clone().oneshot(form("/api/search", "city=Oslo")),
    );

    let berlin = body_text(berlin.unwrap()).await;
    let oslo = body_text(oslo.unwrap()).await;
    assert!(berlin.contains("<h1>Berlin</h1>"));
    assert!(!berlin.contains("Oslo"));
    assert!(oslo.contains("<h1>Oslo</h1>"));
    assert!(!oslo.contains("Berlin"));
}

#[tokio::test]
async fn test_search_unknown_city_renders_error_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(form("/api/search", "city=Atlantis"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h2>Oops!</h2>"));
    assert!(html.contains("City not found. Please try a different city."));
}

#[tokio::test]
async fn test_locate_reports_browser_failure() {
    let server = MockServer::start().await;
    let app = app(&server);

    let response = app
        .clone()
        .oneshot(json("/api/locate", r#"{"error": "unsupported"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Geolocation not supported."));

    let response = app
        .oneshot(json("/api/locate", r#"{"error": "denied"}"#))
        .await
        .unwrap();
    assert!(
        body_text(response)
            .await
            .contains("Unable to access your location. Please enter a city.")
    );
}

#[tokio::test]
async fn test_locate_rejects_out_of_range_coordinates() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(json("/api/locate", r#"{"latitude": 95.0, "longitude": 0.0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let server = MockServer::start().await;

    let response = app(&server)
        .oneshot(Request::get("/static/style.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

//! OpenWeatherMap client against a mock provider

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::time::Instant;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xweather::api::{FetchError, OpenWeatherClient};
use xweather::state::{Condition, WeatherSnapshot};

fn london() -> serde_json::Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
        "main": {"temp": 9.49, "feels_like": 7.1, "pressure": 1019, "humidity": 87},
        "visibility": 10000,
        "wind": {"speed": 5.14, "deg": 240},
        "name": "London",
        "cod": 200
    })
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("test-key").with_base_url(server.uri())
}

#[tokio::test]
async fn test_fetch_snapshot_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_snapshot("London").await.unwrap();

    assert_eq!(
        snapshot,
        WeatherSnapshot {
            temperature_c: 9,
            humidity: 87,
            condition: Condition {
                text: "broken clouds".into(),
                icon: "04n".into(),
                icon_url: "https://openweathermap.org/img/wn/04n@2x.png".into(),
            },
            // 5.14 m/s = 18.504 km/h
            wind_kph: 19,
        }
    );
}

#[tokio::test]
async fn test_city_with_spaces_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_snapshot("New York").await;

    assert!(result.is_ok(), "got {:?}", result);
}

#[tokio::test]
async fn test_unknown_city_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_snapshot("InvalidCity123")
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_snapshot("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_provider_is_request_error() {
    // Nothing listens on port 9 (discard) in test environments.
    let client = OpenWeatherClient::new("k").with_base_url("http://127.0.0.1:9");

    let err = client.fetch_snapshot("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn test_paced_fetch_waits_for_min_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london()))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let min_delay = Duration::from_millis(200);

    let started = Instant::now();
    let result = client.fetch_snapshot_paced("London", min_delay).await;

    assert!(result.is_ok());
    assert!(started.elapsed() >= min_delay);
}

#[tokio::test]
async fn test_paced_fetch_also_delays_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let min_delay = Duration::from_millis(150);

    let started = Instant::now();
    let result = client.fetch_snapshot_paced("London", min_delay).await;

    assert!(result.is_err());
    assert!(started.elapsed() >= min_delay);
}

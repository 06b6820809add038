//! Integration tests for the Open-Meteo client using wiremock.

use std::time::Duration;

use weather_core::{Coordinates, ForecastSource, Geocoder, OpenMeteo, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OpenMeteo {
    OpenMeteo::new(server.uri(), server.uri(), Duration::from_secs(5)).unwrap()
}

// Nothing listens on the discard port locally, so connections are refused.
fn unreachable() -> OpenMeteo {
    let url = "http://127.0.0.1:9";
    OpenMeteo::new(url, url, Duration::from_secs(2)).unwrap()
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.34,
        "timezone": "Europe/Paris",
        "current": {
            "time": "2025-01-01T12:00",
            "interval": 900,
            "temperature_2m": 15.4,
            "relative_humidity_2m": 71,
            "apparent_temperature": 13.9,
            "weather_code": 3,
            "wind_speed_10m": 11.2,
            "visibility": 24140.0,
            "surface_pressure": 1008.6
        },
        "daily": {
            "time": ["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04", "2025-01-05", "2025-01-06"],
            "weather_code": [3, 61, 0, 45, 71, 95],
            "temperature_2m_max": [16.0, 12.3, 9.8, 7.5, 2.1, 14.6],
            "temperature_2m_min": [8.2, 6.1, 1.4, -0.6, -3.5, 9.0],
            "relative_humidity_2m_max": [90, 97, 80, 100, 93, 88],
            "wind_speed_10m_max": [20.1, 33.7, 9.4, 5.0, 18.8, 41.2]
        }
    })
}

#[tokio::test]
async fn resolve_coordinates_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Paris", "latitude": 48.85, "longitude": 2.35, "country": "France" },
                { "name": "Paris", "latitude": 33.66, "longitude": -95.55, "country": "United States" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let at = client(&server).resolve_coordinates("Paris").await.unwrap();
    assert_eq!(at, Coordinates::new(48.85, 2.35));
}

#[tokio::test]
async fn resolve_coordinates_with_no_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Nonexistent City Zzz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .resolve_coordinates("Nonexistent City Zzz")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WeatherError::NotFound(
            "City \"Nonexistent City Zzz\" not found. Please check the spelling and try again."
                .into()
        )
    );
}

#[tokio::test]
async fn resolve_coordinates_without_results_key_is_not_found() {
    let server = MockServer::start().await;

    // Open-Meteo omits `results` entirely when nothing matches.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.5
        })))
        .mount(&server)
        .await;

    let err = client(&server).resolve_coordinates("Qwxz").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn resolve_coordinates_reports_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client(&server).resolve_coordinates("Paris").await.unwrap_err();
    assert_eq!(err, WeatherError::Transport("HTTP error! status: 500".into()));
}

#[tokio::test]
async fn resolve_coordinates_reports_unreachable_service() {
    let err = unreachable().resolve_coordinates("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn resolve_city_name_returns_first_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Paris", "latitude": 48.85, "longitude": 2.35 }]
        })))
        .mount(&server)
        .await;

    let name = client(&server)
        .resolve_city_name(Coordinates::new(48.85, 2.35))
        .await;
    assert_eq!(name, "Paris");
}

#[tokio::test]
async fn resolve_city_name_falls_back_when_unreachable() {
    let name = unreachable().resolve_city_name(Coordinates::new(48.85, 2.35)).await;
    assert_eq!(name, "Your Location");
}

#[tokio::test]
async fn resolve_city_name_falls_back_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter 'name' is required"
        })))
        .mount(&server)
        .await;

    let name = client(&server)
        .resolve_city_name(Coordinates::new(1.0, 2.0))
        .await;
    assert_eq!(name, "Your Location");
}

#[tokio::test]
async fn fetch_weather_requests_fixed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,visibility,surface_pressure",
        ))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min,relative_humidity_2m_max,wind_speed_10m_max",
        ))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client(&server)
        .fetch_weather(Coordinates::new(48.85, 2.35))
        .await
        .unwrap();

    assert_eq!(report.current.temperature, 15.4);
    assert_eq!(report.current.weather_code, 3);
    assert_eq!(report.current.observed_at.to_string(), "2025-01-01 12:00:00");
    assert_eq!(report.daily.len(), 6);
    assert_eq!(report.daily[5].wind_speed_max, 41.2);
    assert_eq!(report.upcoming().len(), 5);
    assert_eq!(report.upcoming()[0].date.to_string(), "2025-01-02");
}

#[tokio::test]
async fn fetch_weather_without_sections_is_malformed() {
    for body in [
        serde_json::json!({ "daily": forecast_body()["daily"].clone() }),
        serde_json::json!({ "current": forecast_body()["current"].clone() }),
        serde_json::json!({}),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_weather(Coordinates::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            WeatherError::MalformedResponse("Invalid weather data received".into())
        );
    }
}

#[tokio::test]
async fn fetch_weather_reports_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_weather(Coordinates::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert_eq!(err, WeatherError::Transport("Weather API error! status: 503".into()));
}

#[tokio::test]
async fn fetch_weather_rejects_non_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_weather(Coordinates::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)), "{err:?}");
}

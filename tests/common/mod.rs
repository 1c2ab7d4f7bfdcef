//! Shared mock upstreams for the integration tests

#![allow(dead_code)]

use serde_json::{Value, json};
use skycast::config::WeatherConfig;
use skycast::{Dashboard, WeatherService};
use wiremock::MockServer;

pub const FORECAST_PATH: &str = "/v1/forecast";
pub const GEOCODING_PATH: &str = "/v1/search";
pub const REVERSE_PATH: &str = "/data/reverse-geocode-client";

pub fn weather_config(server: &MockServer) -> WeatherConfig {
    WeatherConfig {
        forecast_url: format!("{}{}", server.uri(), FORECAST_PATH),
        geocoding_url: format!("{}{}", server.uri(), GEOCODING_PATH),
        reverse_geocoding_url: format!("{}{}", server.uri(), REVERSE_PATH),
        ..WeatherConfig::default()
    }
}

pub fn dashboard(server: &MockServer) -> Dashboard {
    Dashboard::new(WeatherService::new(&weather_config(server)).unwrap())
}

/// Forecast body with `days` daily entries starting on Saturday 2024-06-01
pub fn forecast_body(temperature: f64, days: usize) -> Value {
    let dates: Vec<String> = (0..days).map(|d| format!("2024-06-{:02}", d + 1)).collect();
    json!({
        "latitude": 52.52,
        "longitude": 13.41,
        "timezone": "Europe/Berlin",
        "current": {
            "time": "2024-06-01T12:00",
            "interval": 900,
            "temperature_2m": temperature,
            "apparent_temperature": 15.2,
            "relative_humidity_2m": 58,
            "is_day": 1,
            "weather_code": 1,
            "wind_speed_10m": 9.4,
            "pressure_msl": 1016.3
        },
        "daily": {
            "time": dates,
            "weather_code": vec![3; days],
            "temperature_2m_max": vec![21.6; days],
            "temperature_2m_min": vec![12.2; days]
        }
    })
}

pub fn geocoding_body(latitude: f64, longitude: f64) -> Value {
    json!({
        "results": [{
            "id": 2950159,
            "name": "Berlin",
            "latitude": latitude,
            "longitude": longitude,
            "country": "Germany"
        }],
        "generationtime_ms": 0.6
    })
}

pub fn reverse_body(city: &str, country: &str) -> Value {
    json!({
        "latitude": 52.52,
        "longitude": 13.41,
        "city": city,
        "locality": "Mitte",
        "principalSubdivision": "Berlin",
        "countryName": country
    })
}

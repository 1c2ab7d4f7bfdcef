//! Open-meteo client: forecast and forward geocoding
//!
//! Both endpoints are keyless. Every request is sent once; failures surface
//! as [`DashboardError`] values carrying the stage-specific message.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{Coordinate, WeatherReport};
use crate::{DashboardError, Result};

const USER_AGENT: &str = concat!("Skycast/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,is_day,weather_code,wind_speed_10m,pressure_msl";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Build the HTTP client shared by all upstream calls
pub fn http_client(config: &WeatherConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds.into()));
    }
    builder
        .build()
        .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))
}

/// Forward geocoding match
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub coordinate: Coordinate,
    pub country: Option<String>,
}

/// Client for the open-meteo forecast and geocoding APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            forecast_url: config.forecast_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            language: config.language.clone(),
        }
    }

    /// Current conditions and the daily series for a coordinate
    #[instrument(skip(self), fields(lat = coord.latitude, lon = coord.longitude))]
    pub async fn get_weather(&self, coord: Coordinate) -> Result<WeatherReport> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&daily={}&timezone=auto",
            self.forecast_url, coord.latitude, coord.longitude, CURRENT_FIELDS, DAILY_FIELDS
        );
        debug!("Forecast request URL: {}", url);

        let response = send(&self.client, &url)
            .await
            .map_err(DashboardError::weather_fetch)?;

        let forecast: openmeteo::ForecastResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::weather_fetch(format!("Failed to parse forecast response: {e}")))?;

        let report = WeatherReport::try_from(forecast).map_err(DashboardError::weather_fetch)?;

        info!(
            "Retrieved weather for {} ({} forecast days)",
            coord.format_coordinates(),
            report.daily.len()
        );
        Ok(report)
    }

    /// Best match for a place name. An empty vector means no match.
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}?name={}&count=1&language={}&format=json",
            self.geocoding_url,
            urlencoding::encode(name),
            urlencoding::encode(&self.language)
        );
        debug!("Geocoding request URL: {}", url);

        let response = send(&self.client, &url)
            .await
            .map_err(DashboardError::geocoding)?;

        let body: openmeteo::GeocodingResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::geocoding(format!("Failed to parse geocoding response: {e}")))?;

        let results: Vec<GeocodingResult> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodingResult::from)
            .collect();

        if results.is_empty() {
            warn!("No results found for location '{}'", name);
        }
        Ok(results)
    }
}

/// Send a GET request, treating non-2xx statuses as failures
pub(crate) async fn send(client: &Client, url: &str) -> std::result::Result<Response, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!(
            "request failed with status: {} - {}",
            status,
            status.canonical_reason().unwrap_or("Unknown error")
        ));
    }
    Ok(response)
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use serde::Deserialize;

    use super::GeocodingResult;
    use crate::models::{Coordinate, CurrentConditions, DailyForecastSeries, WeatherReport};

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        pub apparent_temperature: f64,
        #[serde(rename = "relative_humidity_2m")]
        pub relative_humidity: Option<f64>,
        /// 1 during daylight, 0 at night
        #[serde(default)]
        pub is_day: u8,
        pub weather_code: i32,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: Option<f64>,
        #[serde(rename = "pressure_msl")]
        pub pressure: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        pub weather_code: Vec<Option<i32>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Vec<Option<f64>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Vec<Option<f64>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingEntry>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingEntry {
        pub name: Option<String>,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    impl From<GeocodingEntry> for GeocodingResult {
        fn from(entry: GeocodingEntry) -> Self {
            GeocodingResult {
                name: entry.name,
                coordinate: Coordinate::new(entry.latitude, entry.longitude),
                country: entry.country,
            }
        }
    }

    impl From<CurrentData> for CurrentConditions {
        fn from(current: CurrentData) -> Self {
            CurrentConditions {
                temperature: current.temperature,
                apparent_temperature: current.apparent_temperature,
                relative_humidity: current.relative_humidity,
                wind_speed: current.wind_speed,
                pressure: current.pressure,
                weather_code: current.weather_code,
                is_day: current.is_day != 0,
            }
        }
    }

    impl TryFrom<ForecastResponse> for WeatherReport {
        type Error = String;

        fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
            let current = response
                .current
                .ok_or_else(|| "forecast response has no current block".to_string())?;
            let daily = response
                .daily
                .ok_or_else(|| "forecast response has no daily block".to_string())?;

            Ok(WeatherReport {
                current: current.into(),
                daily: DailyForecastSeries::new(
                    daily.time,
                    daily.weather_code,
                    daily.temperature_max,
                    daily.temperature_min,
                )?,
            })
        }
    }
}

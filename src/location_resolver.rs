//! Location Resolution Module
//!
//! This module turns a location service reading or a typed city name into
//! a [`Coordinate`] for the forecast stage.

use std::future::Future;

use tracing::{debug, info, instrument, warn};

use crate::models::Coordinate;
use crate::weather::OpenMeteoClient;
use crate::{DashboardError, Result};

/// Why the location service could not deliver a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The user or platform refused access
    PermissionDenied,
    /// The service exists but could not produce a fix
    Unavailable,
    /// There is no location service at all
    Unsupported,
}

impl From<PositionError> for DashboardError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::PermissionDenied => DashboardError::location_denied("permission denied"),
            PositionError::Unavailable => DashboardError::location_denied("position unavailable"),
            PositionError::Unsupported => DashboardError::LocationUnsupported,
        }
    }
}

/// A platform location service that answers one-shot position requests
pub trait PositionSource {
    fn current_position(
        &self,
    ) -> impl Future<Output = std::result::Result<Coordinate, PositionError>> + Send;
}

/// A reading already taken by someone else, e.g. the browser
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPosition(pub std::result::Result<Coordinate, PositionError>);

impl PositionSource for ReportedPosition {
    async fn current_position(&self) -> std::result::Result<Coordinate, PositionError> {
        self.0.clone()
    }
}

/// A fixed position from configuration. `None` means no location service.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedPosition(pub Option<Coordinate>);

impl PositionSource for FixedPosition {
    async fn current_position(&self) -> std::result::Result<Coordinate, PositionError> {
        self.0.ok_or(PositionError::Unsupported)
    }
}

/// Trim a typed city name, rejecting empty input before any request is made
pub fn validate_city(input: &str) -> Result<&str> {
    let city = input.trim();
    if city.is_empty() {
        return Err(DashboardError::EmptyCity);
    }
    Ok(city)
}

/// Service for resolving location inputs
#[derive(Debug, Clone)]
pub struct LocationResolver {
    api_client: OpenMeteoClient,
}

impl LocationResolver {
    pub fn new(api_client: OpenMeteoClient) -> Self {
        Self { api_client }
    }

    /// Ask the location service for a one-shot position
    pub async fn resolve_sensor<P: PositionSource>(&self, source: &P) -> Result<Coordinate> {
        match source.current_position().await {
            Ok(coord) => {
                debug!("Location service reported {}", coord.format_coordinates());
                Ok(coord)
            }
            Err(e) => {
                warn!("Location service failed: {:?}", e);
                Err(e.into())
            }
        }
    }

    /// Resolve a city name to coordinates via geocoding
    #[instrument(skip(self))]
    pub async fn resolve_name(&self, input: &str) -> Result<Coordinate> {
        let city = validate_city(input)?;
        debug!("Geocoding location name: {}", city);

        let geocoding = self
            .api_client
            .geocode(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::CityNotFound {
                city: city.to_string(),
            })?;

        info!(
            "Found location: {} ({})",
            geocoding.name.as_deref().unwrap_or(city),
            geocoding.coordinate.format_coordinates()
        );
        Ok(geocoding.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;
    use crate::weather::http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> LocationResolver {
        let config = WeatherConfig {
            geocoding_url: format!("{}/v1/search", server.uri()),
            ..WeatherConfig::default()
        };
        LocationResolver::new(OpenMeteoClient::new(http_client(&config).unwrap(), &config))
    }

    #[test]
    fn test_validate_city() {
        assert_eq!(validate_city("  Oslo \n").unwrap(), "Oslo");
        assert!(matches!(validate_city(""), Err(DashboardError::EmptyCity)));
        assert!(matches!(validate_city(" \t "), Err(DashboardError::EmptyCity)));
    }

    #[tokio::test]
    async fn test_resolve_sensor_messages() {
        let server = MockServer::start().await;
        let resolver = resolver_for(&server);

        let ok = ReportedPosition(Ok(Coordinate::new(1.5, 2.5)));
        assert_eq!(
            resolver.resolve_sensor(&ok).await.unwrap(),
            Coordinate::new(1.5, 2.5)
        );

        let denied = ReportedPosition(Err(PositionError::PermissionDenied));
        assert_eq!(
            resolver.resolve_sensor(&denied).await.unwrap_err().to_string(),
            "Unable to access your location. Please enter a city."
        );

        let unavailable = ReportedPosition(Err(PositionError::Unavailable));
        assert_eq!(
            resolver.resolve_sensor(&unavailable).await.unwrap_err().to_string(),
            "Unable to access your location. Please enter a city."
        );

        let absent = FixedPosition(None);
        assert_eq!(
            resolver.resolve_sensor(&absent).await.unwrap_err().to_string(),
            "Geolocation not supported."
        );
    }

    #[tokio::test]
    async fn test_resolve_name_uses_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "name": "Interlaken", "latitude": 46.68387, "longitude": 7.86638 },
                    { "name": "Other", "latitude": 0.0, "longitude": 0.0 }
                ]
            })))
            .mount(&server)
            .await;

        let coord = resolver_for(&server).resolve_name(" Interlaken ").await.unwrap();
        assert_eq!(coord, Coordinate::new(46.68387, 7.86638));
    }

    #[tokio::test]
    async fn test_resolve_name_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let err = resolver_for(&server).resolve_name("Atlantis").await.unwrap_err();
        assert_eq!(err.to_string(), "City not found. Please try a different city.");
    }

    #[tokio::test]
    async fn test_resolve_name_empty_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = resolver_for(&server).resolve_name("   ").await.unwrap_err();
        assert!(err.is_prompt());
    }
}

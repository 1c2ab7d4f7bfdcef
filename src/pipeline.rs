//! Weather pipeline: location → forecast → place label
//!
//! Each stage is an async function returning a `Result`; the first failure
//! short-circuits the run. Reverse geocoding cannot fail.

use tracing::{info, instrument};

use crate::config::WeatherConfig;
use crate::location_resolver::{LocationResolver, PositionSource};
use crate::models::{Coordinate, PlaceLabel, WeatherReport};
use crate::reverse_geocode::ReverseGeocoder;
use crate::weather::{OpenMeteoClient, http_client};
use crate::Result;

/// What a successful run hands to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub report: WeatherReport,
    pub place: PlaceLabel,
}

/// The three upstream services wired together
#[derive(Debug, Clone)]
pub struct WeatherService {
    resolver: LocationResolver,
    weather: OpenMeteoClient,
    reverse: ReverseGeocoder,
}

impl WeatherService {
    /// Create the service with one shared HTTP client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = http_client(config)?;
        let weather = OpenMeteoClient::new(client.clone(), config);
        Ok(Self {
            resolver: LocationResolver::new(weather.clone()),
            weather,
            reverse: ReverseGeocoder::new(client, config),
        })
    }

    /// Sensor path: location service reading, then weather
    pub async fn for_sensor<P: PositionSource>(&self, source: &P) -> Result<DashboardData> {
        let coord = self.resolver.resolve_sensor(source).await?;
        self.for_coordinate(coord).await
    }

    /// City path: geocode the name, then weather
    pub async fn for_city(&self, city: &str) -> Result<DashboardData> {
        let coord = self.resolver.resolve_name(city).await?;
        self.for_coordinate(coord).await
    }

    /// Fetch weather, then label the place. Reverse geocoding is skipped if the fetch fails.
    #[instrument(skip(self), fields(lat = coord.latitude, lon = coord.longitude))]
    pub async fn for_coordinate(&self, coord: Coordinate) -> Result<DashboardData> {
        let report = self.weather.get_weather(coord).await?;
        let place = self.reverse.resolve(coord).await;

        info!("Dashboard ready for {}", place.name);
        Ok(DashboardData { report, place })
    }
}

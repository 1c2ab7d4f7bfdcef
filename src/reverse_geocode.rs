//! Reverse geocoding: convert coordinates to a place label.
//! Uses the BigDataCloud client endpoint - free, no API key required.
//!
//! Resolution never fails: any transport or parse problem yields
//! [`PlaceLabel::fallback`].

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{Coordinate, PlaceLabel};
use crate::weather::send;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
    country_name: Option<String>,
}

impl ReverseGeocodeResponse {
    fn into_label(self) -> PlaceLabel {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        // Prefer city > locality > principal subdivision for the place name
        let name = non_empty(self.city)
            .or_else(|| non_empty(self.locality))
            .or_else(|| non_empty(self.principal_subdivision))
            .unwrap_or_else(|| PlaceLabel::UNKNOWN_NAME.to_string());

        PlaceLabel::new(name, self.country_name.unwrap_or_default())
    }
}

/// Client for the reverse geocoding endpoint
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: Client,
    base_url: String,
    language: String,
}

impl ReverseGeocoder {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.reverse_geocoding_url.clone(),
            language: config.language.clone(),
        }
    }

    /// Resolve a coordinate to a place label, degrading to the fallback label on any failure
    #[instrument(skip(self), fields(lat = coord.latitude, lon = coord.longitude))]
    pub async fn resolve(&self, coord: Coordinate) -> PlaceLabel {
        let url = format!(
            "{}?latitude={}&longitude={}&localityLanguage={}",
            self.base_url,
            coord.latitude,
            coord.longitude,
            urlencoding::encode(&self.language)
        );
        debug!("Reverse geocode request URL: {}", url);

        let response = match send(&self.client, &url).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Reverse geocode failed, using fallback label: {}", e);
                return PlaceLabel::fallback();
            }
        };

        let body: ReverseGeocodeResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!("Reverse geocode parse error, using fallback label: {}", e);
                return PlaceLabel::fallback();
            }
        };

        let label = body.into_label();
        info!("Reverse geocoded to: {}, {}", label.name, label.country);
        label
    }
}

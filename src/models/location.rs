//! Location models: coordinates and place labels

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a coordinate string for logs
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Human-readable name for a coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlaceLabel {
    /// City, locality or subdivision name
    pub name: String,
    /// Country name, empty when unknown
    pub country: String,
}

impl PlaceLabel {
    /// Name used when the reverse geocoder answered without any place field
    pub const UNKNOWN_NAME: &'static str = "Unknown Location";
    /// Name used when reverse geocoding failed outright
    pub const FALLBACK_NAME: &'static str = "Your Location";

    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    /// The degraded label substituted when the place cannot be resolved
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK_NAME, "")
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.name == Self::FALLBACK_NAME && self.country.is_empty()
    }
}

impl Default for PlaceLabel {
    fn default() -> Self {
        Self::fallback()
    }
}

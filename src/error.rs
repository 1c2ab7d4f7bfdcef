//! Error types and handling for the `Skycast` dashboard
//!
//! Every variant displays as the exact static message shown to the user.
//! Transport and parse causes are kept in `detail` for logging only.

use std::fmt::Display;

use thiserror::Error;

/// Main error type for the dashboard pipeline
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The location service refused or failed to deliver a position
    #[error("Unable to access your location. Please enter a city.")]
    LocationDenied { detail: String },

    /// No location service is available at all
    #[error("Geolocation not supported.")]
    LocationUnsupported,

    /// Search was issued with an empty or whitespace-only city
    #[error("Enter a city name first!")]
    EmptyCity,

    /// Geocoding answered, but with zero matches
    #[error("City not found. Please try a different city.")]
    CityNotFound { city: String },

    /// Geocoding request or response decoding failed
    #[error("City geocoding failed. Try again.")]
    Geocoding { detail: String },

    /// Forecast request or response decoding failed
    #[error("Unable to fetch weather data.")]
    WeatherFetch { detail: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DashboardError {
    /// Create a new location-denied error
    pub fn location_denied<S: Display>(detail: S) -> Self {
        Self::LocationDenied {
            detail: detail.to_string(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Display>(detail: S) -> Self {
        Self::Geocoding {
            detail: detail.to_string(),
        }
    }

    /// Create a new weather fetch error
    pub fn weather_fetch<S: Display>(detail: S) -> Self {
        Self::WeatherFetch {
            detail: detail.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Text for the error panel (or the prompt, for [`DashboardError::EmptyCity`])
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Underlying cause, if one was captured
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            DashboardError::LocationDenied { detail }
            | DashboardError::Geocoding { detail }
            | DashboardError::WeatherFetch { detail } => Some(detail.as_str()),
            DashboardError::CityNotFound { city } => Some(city.as_str()),
            DashboardError::Config { message } => Some(message.as_str()),
            DashboardError::LocationUnsupported | DashboardError::EmptyCity => None,
        }
    }

    /// Input validation errors interrupt with a blocking prompt instead of the error panel
    #[must_use]
    pub fn is_prompt(&self) -> bool {
        matches!(self, DashboardError::EmptyCity)
    }
}

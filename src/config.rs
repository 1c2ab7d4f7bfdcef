//! Configuration management for `Skycast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// Upstream API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Fixed position used as the location service outside the browser
    #[serde(default)]
    pub location: LocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Forward geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Reverse geocoding endpoint
    #[serde(default = "default_reverse_geocoding_url")]
    pub reverse_geocoding_url: String,
    /// Language code passed to the geocoding APIs
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds. Requests never time out when unset.
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

/// Position reported by the location service when running headless.
/// Leaving both fields unset means there is no location service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_reverse_geocoding_url() -> String {
    "https://api.bigdatacloud.net/data/reverse-geocode-client".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            reverse_geocoding_url: default_reverse_geocoding_url(),
            language: default_language(),
            timeout_seconds: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LocationConfig {
    /// The configured coordinate, if the location service is present
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl SkycastConfig {
    /// Load configuration from a file (or the default location when `None`) and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYCAST_WEATHER__FORECAST_URL, SKYCAST_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Apply default values to fields given as empty strings
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.reverse_geocoding_url.is_empty() {
            self.weather.reverse_geocoding_url = default_reverse_geocoding_url();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_language();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.assets_dir.is_empty() {
            self.server.assets_dir = default_assets_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_location()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("forecast_url", &self.weather.forecast_url),
            ("geocoding_url", &self.weather.geocoding_url),
            ("reverse_geocoding_url", &self.weather.reverse_geocoding_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "weather.{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if let Some(timeout) = self.weather.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(DashboardError::config(
                    "Weather API timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_location(&self) -> Result<()> {
        match (self.location.latitude, self.location.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(DashboardError::config(format!(
                        "Latitude must be between -90 and 90, got: {lat}"
                    ))
                    .into());
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(DashboardError::config(format!(
                        "Longitude must be between -180 and 180, got: {lon}"
                    ))
                    .into());
                }
                Ok(())
            }
            _ => Err(DashboardError::config(
                "location.latitude and location.longitude must be set together",
            )
            .into()),
        }
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.weather.language.trim().is_empty() {
            return Err(DashboardError::config("Language code cannot be blank").into());
        }

        Ok(())
    }
}

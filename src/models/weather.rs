//! Current conditions and the weather report bundle

use serde::{Deserialize, Serialize};

use super::DailyForecastSeries;

/// Current conditions as reported by the forecast API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Apparent ("feels like") temperature in Celsius
    pub apparent_temperature: f64,
    /// Relative humidity in percent
    pub relative_humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Mean sea level pressure in hPa
    pub pressure: Option<f64>,
    /// WMO weather code
    pub weather_code: i32,
    /// Whether the sun is up at the coordinate
    pub is_day: bool,
}

/// Everything the forecast stage produces for one coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: DailyForecastSeries,
}

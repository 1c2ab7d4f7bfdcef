//! Data models for the Skycast dashboard
//!
//! This module contains the request-scoped domain models organized by concern:
//! - Location: coordinates and the resolved place label
//! - Weather: current conditions and the bundled weather report
//! - Forecast: the daily forecast series

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailyForecastSeries, DayForecast};
pub use location::{Coordinate, PlaceLabel};
pub use weather::{CurrentConditions, WeatherReport};

//! `Skycast` - weather dashboard
//!
//! Resolves the user's position or a typed city to coordinates, fetches
//! current conditions and a short forecast from open-meteo, labels the place
//! via reverse geocoding and renders the result as an HTML dashboard.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod reverse_geocode;
pub mod weather;
pub mod weather_codes;
pub mod web;

// Re-export core types for public API
pub use config::SkycastConfig;
pub use dashboard::{Dashboard, DashboardView, Generation, Outcome};
pub use error::DashboardError;
pub use location_resolver::{FixedPosition, PositionError, PositionSource, ReportedPosition};
pub use models::{Coordinate, CurrentConditions, DailyForecastSeries, PlaceLabel, WeatherReport};
pub use pipeline::{DashboardData, WeatherService};
pub use render::View;
pub use weather_codes::{WeatherCodeEntry, lookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;

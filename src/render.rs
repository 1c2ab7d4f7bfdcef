//! Dashboard Renderer
//!
//! Pure functions from data to HTML fragments. Each [`View`] fully replaces
//! the dashboard container.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{CurrentConditions, DailyForecastSeries, DayForecast, PlaceLabel};
use crate::pipeline::DashboardData;
use crate::weather_codes;
use crate::{DashboardError, Result};

/// Number of days shown after today
pub const FORECAST_DAYS: usize = 4;

const PLACEHOLDER: &str = "-";

/// The three mutually exclusive render modes
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading,
    Error(String),
    Success(Box<DashboardData>),
}

impl View {
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            View::Loading => render_loading(),
            View::Error(message) => render_error(message),
            View::Success(data) => render_dashboard(data),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading)
    }
}

impl From<Result<DashboardData>> for View {
    fn from(result: Result<DashboardData>) -> Self {
        match result {
            Ok(data) => View::Success(Box::new(data)),
            Err(e) => View::from(&e),
        }
    }
}

impl From<&DashboardError> for View {
    fn from(err: &DashboardError) -> Self {
        View::Error(err.user_message())
    }
}

/// Round to the nearest integer, halves rounding up (16.5 → 17, -2.5 → -2)
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn rounded_or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| round_half_up(v).to_string())
}

fn source_or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// Abbreviated weekday for an ISO date, or the raw string if it does not parse
#[must_use]
pub fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |d| d.format("%a").to_string())
}

/// Escape text for inclusion in HTML content or attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[must_use]
pub fn render_loading() -> String {
    r#"<div class="loading">
    <div class="spinner"></div>
    <p>Loading weather data...</p>
</div>"#
        .to_string()
}

#[must_use]
pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error"><h2>Oops!</h2><p>{}</p></div>"#,
        escape_html(message)
    )
}

#[must_use]
pub fn render_dashboard(data: &DashboardData) -> String {
    let mut html = String::new();
    write_header(&mut html, &data.place);
    write_current(&mut html, &data.report.current);
    write_forecast(&mut html, &data.report.daily);
    html
}

fn write_header(html: &mut String, place: &PlaceLabel) {
    let _ = write!(
        html,
        r#"<div class="weather-header">
    <h1>{}</h1>
    <div class="location">{}</div>
</div>
"#,
        escape_html(&place.name),
        escape_html(&place.country)
    );
}

fn write_current(html: &mut String, current: &CurrentConditions) {
    let info = weather_codes::lookup(current.weather_code, current.is_day);

    let _ = write!(
        html,
        r#"<div class="weather-main">
    <div class="weather-icon">{icon}</div>
    <div class="temperature">{temperature}°C</div>
</div>
<div class="weather-description">{description}</div>
<div class="weather-details">
"#,
        icon = info.icon,
        temperature = round_half_up(current.temperature),
        description = info.description,
    );

    let tiles = [
        ("🌡️", "Feels like", format!("{}°C", round_half_up(current.apparent_temperature))),
        ("💧", "Humidity", format!("{}%", source_or_placeholder(current.relative_humidity))),
        ("💨", "Wind", format!("{} km/h", source_or_placeholder(current.wind_speed))),
        ("📊", "Pressure", format!("{} hPa", rounded_or_placeholder(current.pressure))),
    ];
    for (icon, label, value) in tiles {
        let _ = write!(
            html,
            r#"    <div class="detail-item"><span class="icon">{icon}</span>
        <div class="text">{label}<br><strong>{value}</strong></div>
    </div>
"#
        );
    }
    html.push_str("</div>\n");
}

fn write_forecast(html: &mut String, daily: &DailyForecastSeries) {
    html.push_str(
        r#"<div class="forecast-header"><b>Forecast</b></div>
<div class="forecast-row">
"#,
    );
    for day in daily.upcoming(FORECAST_DAYS) {
        write_forecast_item(html, &day);
    }
    html.push_str("</div>\n");
}

fn write_forecast_item(html: &mut String, day: &DayForecast<'_>) {
    // Daily tiles always use the daytime icon
    let info = day
        .weather_code
        .map_or(weather_codes::UNKNOWN, |code| weather_codes::lookup(code, true));
    let _ = write!(
        html,
        r#"    <div class="forecast-item">
        <div class="forecast-day">{weekday}</div>
        <div>{icon}</div>
        <div class="forecast-description">{description}</div>
        <div class="forecast-temp"><b>{min}° / {max}°C</b></div>
    </div>
"#,
        weekday = escape_html(&weekday_label(day.date)),
        icon = info.icon,
        description = info.description,
        min = rounded_or_placeholder(day.temperature_min),
        max = rounded_or_placeholder(day.temperature_max),
    );
}

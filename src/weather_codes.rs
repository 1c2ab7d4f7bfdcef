//! WMO weather code table
//!
//! Maps the weather codes used by open-meteo to a description and an icon.
//! See: https://open-meteo.com/en/docs#weathervariables
//!
//! [`lookup`] is total over all of `i32`: every code outside the table
//! resolves to [`UNKNOWN`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// Description and icon for one weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub description: &'static str,
    pub icon: &'static str,
}

/// Entry returned for codes missing from the table
pub const UNKNOWN: WeatherCodeEntry = WeatherCodeEntry {
    description: "Unknown",
    icon: "❓",
};

struct CodeDefinition {
    description: &'static str,
    day_icon: &'static str,
    night_icon: &'static str,
}

const fn same(description: &'static str, icon: &'static str) -> CodeDefinition {
    CodeDefinition {
        description,
        day_icon: icon,
        night_icon: icon,
    }
}

const fn day_night(
    description: &'static str,
    day_icon: &'static str,
    night_icon: &'static str,
) -> CodeDefinition {
    CodeDefinition {
        description,
        day_icon,
        night_icon,
    }
}

static WEATHER_CODES: LazyLock<HashMap<i32, CodeDefinition>> = LazyLock::new(|| {
    HashMap::from([
        (0, day_night("Clear sky", "☀️", "🌙")),
        (1, day_night("Mainly clear", "🌤️", "🌙")),
        (2, same("Partly cloudy", "⛅")),
        (3, same("Overcast", "☁️")),
        (45, same("Fog", "🌫️")),
        (48, same("Depositing rime fog", "🌫️")),
        (51, same("Light drizzle", "🌦️")),
        (53, same("Moderate drizzle", "🌦️")),
        (55, same("Dense drizzle", "🌧️")),
        (56, same("Light freezing drizzle", "🌧️")),
        (57, same("Dense freezing drizzle", "🌧️")),
        (61, same("Slight rain", "🌦️")),
        (63, same("Moderate rain", "🌧️")),
        (65, same("Heavy rain", "🌧️")),
        (66, same("Light freezing rain", "🌧️")),
        (67, same("Heavy freezing rain", "🌧️")),
        (71, same("Slight snow", "🌨️")),
        (73, same("Moderate snow", "❄️")),
        (75, same("Heavy snow", "❄️")),
        (77, same("Snow grains", "❄️")),
        (80, same("Slight rain showers", "🌦️")),
        (81, same("Moderate rain showers", "🌧️")),
        (82, same("Violent rain showers", "⛈️")),
        (85, same("Slight snow showers", "🌨️")),
        (86, same("Heavy snow showers", "❄️")),
        (95, same("Thunderstorm", "⛈️")),
        (96, same("Thunderstorm w/ slight hail", "⛈️")),
        (99, same("Thunderstorm w/ heavy hail", "⛈️")),
    ])
});

/// Look up the description and icon for a weather code.
///
/// `is_day` only matters for codes 0 and 1.
#[must_use]
pub fn lookup(code: i32, is_day: bool) -> WeatherCodeEntry {
    WEATHER_CODES
        .get(&code)
        .map_or(UNKNOWN, |definition| WeatherCodeEntry {
            description: definition.description,
            icon: if is_day {
                definition.day_icon
            } else {
                definition.night_icon
            },
        })
}

/// All codes present in the table, ascending
#[must_use]
pub fn known_codes() -> Vec<i32> {
    let mut codes: Vec<i32> = WEATHER_CODES.keys().copied().collect();
    codes.sort_unstable();
    codes
}

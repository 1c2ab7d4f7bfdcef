//! Daily forecast series

use serde::{Deserialize, Serialize};

/// Parallel per-day sequences. Index 0 is today.
///
/// All four sequences always have the same length; [`DailyForecastSeries::new`]
/// refuses misaligned input.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DailyForecastSeries {
    time: Vec<String>,
    weather_code: Vec<Option<i32>>,
    temperature_max: Vec<Option<f64>>,
    temperature_min: Vec<Option<f64>>,
}

/// One day of the series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayForecast<'a> {
    /// ISO date string (`YYYY-MM-DD`) as sent by the API
    pub date: &'a str,
    /// `None` when the API sent `null` for that day
    pub weather_code: Option<i32>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
}

impl DailyForecastSeries {
    /// Build a series, checking that every sequence has the same length
    pub fn new(
        time: Vec<String>,
        weather_code: Vec<Option<i32>>,
        temperature_max: Vec<Option<f64>>,
        temperature_min: Vec<Option<f64>>,
    ) -> Result<Self, String> {
        let len = time.len();
        if weather_code.len() != len || temperature_max.len() != len || temperature_min.len() != len
        {
            return Err(format!(
                "daily series misaligned: time={}, weather_code={}, temperature_2m_max={}, temperature_2m_min={}",
                len,
                weather_code.len(),
                temperature_max.len(),
                temperature_min.len()
            ));
        }

        Ok(Self {
            time,
            weather_code,
            temperature_max,
            temperature_min,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    #[must_use]
    pub fn day(&self, index: usize) -> Option<DayForecast<'_>> {
        Some(DayForecast {
            date: self.time.get(index).map(String::as_str)?,
            weather_code: *self.weather_code.get(index)?,
            temperature_max: *self.temperature_max.get(index)?,
            temperature_min: *self.temperature_min.get(index)?,
        })
    }

    /// Days after today, at most `limit` of them (indices `1..=limit`)
    pub fn upcoming(&self, limit: usize) -> impl Iterator<Item = DayForecast<'_>> {
        let end = self.len().min(limit.saturating_add(1));
        (1..end).filter_map(|index| self.day(index))
    }
}

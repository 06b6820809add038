use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Instant conditions at the requested location.
///
/// Units follow the provider defaults: °C, %, km/h, metres and hPa.
/// `observed_at` is wall-clock time at the location (`timezone=auto`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub surface_pressure: f64,
    pub weather_code: i32,
    pub observed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity_max: f64,
    pub wind_speed_max: f64,
}

/// Result of one forecast call. `daily[0]` is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<ForecastDay>,
}

impl WeatherReport {
    /// The days after today, at most five.
    pub fn upcoming(&self) -> &[ForecastDay] {
        let end = self.daily.len().min(6);
        self.daily.get(1..end).unwrap_or(&[])
    }
}

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::Config,
    error::WeatherError,
    model::{Coordinates, CurrentConditions, ForecastDay, WeatherReport},
};

use super::{ForecastSource, Geocoder};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,visibility,surface_pressure";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,relative_humidity_2m_max,wind_speed_10m_max";
const FORECAST_DAYS: &str = "6";
const INVALID_DATA: &str = "Invalid weather data received";

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    pub fn new(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            geocoding_url: trim_base(geocoding_url.into()),
            forecast_url: trim_base(forecast_url.into()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(&config.geocoding_url, &config.forecast_url, config.timeout())
    }

    /// GET `url` and decode the JSON body. `status_label` prefixes the
    /// message of a non-success response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        status_label: &str,
    ) -> Result<T, WeatherError> {
        tracing::debug!(url, ?query, "GET");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::Transport(format!("Request to {url} failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Transport(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "request failed");
            return Err(WeatherError::Transport(format!(
                "{status_label} status: {}",
                status.as_u16()
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn search(&self, query: &[(&str, String)]) -> Result<Vec<OmPlace>, WeatherError> {
        let url = format!("{}/search", self.geocoding_url);
        let parsed: OmSearchResponse = self.get_json(&url, query, "HTTP error!").await?;
        Ok(parsed.results.unwrap_or_default())
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn resolve_coordinates(&self, city: &str) -> Result<Coordinates, WeatherError> {
        let places = self
            .search(&[
                ("name", city.to_string()),
                ("count", "1".to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ])
            .await?;

        let place = places.into_iter().next().ok_or_else(|| {
            WeatherError::NotFound(format!(
                "City \"{city}\" not found. Please check the spelling and try again."
            ))
        })?;

        match (place.latitude, place.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
            _ => Err(WeatherError::MalformedResponse(format!(
                "Geocoding result for \"{city}\" has no coordinates"
            ))),
        }
    }

    async fn lookup_name(&self, at: Coordinates) -> Result<Option<String>, WeatherError> {
        let places = self
            .search(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("count", "1".to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ])
            .await?;

        Ok(places.into_iter().next().and_then(|p| p.name))
    }
}

#[async_trait]
impl ForecastSource for OpenMeteo {
    async fn fetch_weather(&self, at: Coordinates) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/forecast", self.forecast_url);
        let parsed: OmForecastResponse = self
            .get_json(
                &url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                    ("forecast_days", FORECAST_DAYS.to_string()),
                ],
                "Weather API error!",
            )
            .await?;

        let (Some(current), Some(daily)) = (parsed.current, parsed.daily) else {
            return Err(WeatherError::MalformedResponse(INVALID_DATA.to_string()));
        };

        Ok(WeatherReport {
            current: current.into_conditions()?,
            daily: daily.into_days()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

// Open-Meteo reports `null` for values a model does not provide.
#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    weather_code: Option<i32>,
    wind_speed_10m: Option<f64>,
    visibility: Option<f64>,
    surface_pressure: Option<f64>,
}

impl OmCurrent {
    fn into_conditions(self) -> Result<CurrentConditions, WeatherError> {
        let observed_at = NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M")
            .map_err(|e| malformed(format!("bad observation time {:?}: {e}", self.time)))?;

        Ok(CurrentConditions {
            temperature: or_nan(self.temperature_2m),
            apparent_temperature: or_nan(self.apparent_temperature),
            humidity: or_nan(self.relative_humidity_2m),
            wind_speed: or_nan(self.wind_speed_10m),
            visibility: or_nan(self.visibility),
            surface_pressure: or_nan(self.surface_pressure),
            weather_code: self.weather_code.unwrap_or(0),
            observed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weather_code: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    relative_humidity_2m_max: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
}

impl OmDaily {
    fn into_days(self) -> Result<Vec<ForecastDay>, WeatherError> {
        let n = self.time.len();
        let lengths = [
            self.weather_code.len(),
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
            self.relative_humidity_2m_max.len(),
            self.wind_speed_10m_max.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(malformed(format!("daily series lengths differ: {n} dates, {lengths:?}")));
        }

        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|e| malformed(format!("bad forecast date {date:?}: {e}")))?;
                Ok(ForecastDay {
                    date,
                    weather_code: self.weather_code[i].unwrap_or(0),
                    temp_max: or_nan(self.temperature_2m_max[i]),
                    temp_min: or_nan(self.temperature_2m_min[i]),
                    humidity_max: or_nan(self.relative_humidity_2m_max[i]),
                    wind_speed_max: or_nan(self.wind_speed_10m_max[i]),
                })
            })
            .collect()
    }
}

fn or_nan(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

fn malformed(detail: String) -> WeatherError {
    tracing::debug!(%detail, "malformed forecast response");
    WeatherError::MalformedResponse(INVALID_DATA.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

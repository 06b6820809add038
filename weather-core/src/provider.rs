use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherReport},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// Label used when a position cannot be turned into a place name.
pub const FALLBACK_LOCATION_LABEL: &str = "Your Location";

/// Translates between place names and coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve a city name to the best matching coordinates.
    ///
    /// Fails with [`WeatherError::NotFound`] when nothing matches.
    async fn resolve_coordinates(&self, city: &str) -> Result<Coordinates, WeatherError>;

    /// Raw reverse lookup. `Ok(None)` means the service had no match.
    async fn lookup_name(&self, at: Coordinates) -> Result<Option<String>, WeatherError>;

    /// Best-effort reverse lookup: never fails, falls back to
    /// [`FALLBACK_LOCATION_LABEL`].
    async fn resolve_city_name(&self, at: Coordinates) -> String {
        match self.lookup_name(at).await {
            Ok(Some(name)) if !name.trim().is_empty() => name,
            Ok(_) => {
                tracing::debug!(?at, "reverse geocode found no place name");
                FALLBACK_LOCATION_LABEL.to_string()
            }
            Err(err) => {
                tracing::debug!(?at, %err, "reverse geocode failed");
                FALLBACK_LOCATION_LABEL.to_string()
            }
        }
    }
}

/// Retrieves current conditions and the daily series for a position.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_weather(&self, at: Coordinates) -> Result<WeatherReport, WeatherError>;
}

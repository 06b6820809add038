//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The WMO weather code table
//! - Geocoding and forecast access over Open-Meteo
//! - Recent-search tracking with pluggable storage
//! - A presentation layer that writes into an abstract page surface
//! - The search orchestrator tying those together
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod conditions;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod recent;
pub mod ui;
pub mod validate;

pub use app::{SearchPhase, Services, WeatherApp};
pub use config::Config;
pub use error::{GeolocationError, WeatherError};
pub use model::{Coordinates, CurrentConditions, ForecastDay, WeatherReport};
pub use provider::{ForecastSource, Geocoder, OpenMeteo};
pub use recent::RecentCities;
pub use ui::{ElementId, Page, Surface};

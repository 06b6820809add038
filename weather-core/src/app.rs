//! Search orchestration: validation, geocoding, forecast fetch, rendering and
//! recent-city bookkeeping for both entry points.

use std::sync::Arc;

use crate::{
    config::Config,
    error::{GENERIC_FAILURE, GeolocationError, WeatherError},
    geolocation::{self, LocationSource},
    model::{Coordinates, WeatherReport},
    presenter::Presenter,
    provider::{ForecastSource, Geocoder, OpenMeteo},
    recent::{FileStore, MemoryStore, RecentCities, RecentStore},
    ui::Surface,
    validate,
};

/// Shown when a current-location lookup fails without a message.
pub const LOCATION_FAILURE: &str = "Failed to get weather for current location";

/// Remote collaborators of a search.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: Arc<dyn Geocoder>,
    pub forecast: Arc<dyn ForecastSource>,
    pub location: Arc<dyn LocationSource>,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let open_meteo = Arc::new(OpenMeteo::from_config(config)?);
        Ok(Self {
            geocoder: open_meteo.clone(),
            forecast: open_meteo,
            location: Arc::from(geolocation::from_home(config.home)),
        })
    }
}

/// Where the app is within a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Validating,
    Loading,
}

/// All mutable state of one weather session.
///
/// Searches take `&mut self`, so a second search cannot start while one is in
/// flight and results always belong to the latest request.
#[derive(Debug)]
pub struct WeatherApp<S: Surface> {
    services: Services,
    presenter: Presenter<S>,
    recent: RecentCities,
    input: String,
    phase: SearchPhase,
}

impl<S: Surface> WeatherApp<S> {
    pub fn new(services: Services, surface: S, recent: RecentCities) -> Self {
        let mut app = Self {
            services,
            presenter: Presenter::new(surface),
            recent,
            input: String::new(),
            phase: SearchPhase::Idle,
        };
        app.presenter.render_recent(app.recent.list());
        app
    }

    /// Build the app from config: Open-Meteo services, the configured home
    /// position, and a file-backed history when `persist_recent` is set.
    pub fn from_config(config: &Config, surface: S) -> anyhow::Result<Self> {
        let services = Services::from_config(config)?;
        let store: Box<dyn RecentStore> = if config.persist_recent {
            Box::new(FileStore::new(Config::recent_file_path()?))
        } else {
            Box::new(MemoryStore)
        };
        Ok(Self::new(services, surface, RecentCities::new(store)))
    }

    pub fn presenter(&self) -> &Presenter<S> {
        &self.presenter
    }

    pub fn surface(&self) -> &S {
        self.presenter.surface()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn recent(&self) -> &[String] {
        self.recent.list()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.presenter.set_input(text);
    }

    /// The input field gained focus: offer recent cities.
    pub fn focus_input(&mut self) {
        self.presenter.show_recent(self.recent.list());
    }

    /// A click landed outside the input field and the suggestion panel.
    pub fn click_outside(&mut self) {
        self.presenter.hide_recent();
    }

    /// Apply expired banner and cue timers.
    pub fn tick(&mut self) {
        self.presenter.tick();
    }

    /// Search for the city currently in the input field.
    pub async fn search_by_name(&mut self) -> Result<(), WeatherError> {
        self.phase = SearchPhase::Validating;

        let city = match validate::city_name(&self.input) {
            Ok(city) => city.to_string(),
            Err(err) => {
                tracing::debug!(input = %self.input, %err, "rejected city input");
                self.presenter.show_error(&err.to_string());
                self.presenter.flag_invalid_input();
                self.phase = SearchPhase::Idle;
                return Err(err);
            }
        };

        self.presenter.hide_error();
        self.begin_loading();

        let outcome = self.lookup_city(&city).await;
        match &outcome {
            Ok(()) => {
                self.remember(&city);
                self.set_input("");
                self.presenter.hide_recent();
            }
            Err(err) => {
                tracing::debug!(%city, %err, "search failed");
                self.presenter.show_error(&err.user_message(GENERIC_FAILURE));
            }
        }

        self.finish_loading();
        outcome
    }

    /// A recent city was picked from the suggestion panel.
    pub async fn select_recent(&mut self, city: &str) -> Result<(), WeatherError> {
        self.set_input(city);
        self.presenter.hide_recent();
        self.search_by_name().await
    }

    /// Search using the device position.
    pub async fn search_current_location(&mut self) -> Result<(), WeatherError> {
        if !self.services.location.is_supported() {
            let err = WeatherError::from(GeolocationError::Unsupported);
            self.presenter.show_error(&err.to_string());
            return Err(err);
        }

        self.presenter.hide_error();
        self.begin_loading();

        let at = match self.services.location.current_position().await {
            Ok(at) => at,
            Err(geo) => {
                self.finish_loading();
                let err = WeatherError::from(geo);
                self.presenter.show_error(&err.to_string());
                return Err(err);
            }
        };

        let outcome = self.lookup_position(at).await;
        if let Err(err) = &outcome {
            tracing::debug!(?at, %err, "current location search failed");
            self.presenter.show_error(&err.user_message(LOCATION_FAILURE));
        }

        self.finish_loading();
        outcome
    }

    async fn lookup_city(&mut self, city: &str) -> Result<(), WeatherError> {
        let at = self.services.geocoder.resolve_coordinates(city).await?;
        tracing::debug!(city, ?at, "resolved city");

        let report = self.services.forecast.fetch_weather(at).await?;
        self.render(city, &report);
        Ok(())
    }

    async fn lookup_position(&mut self, at: Coordinates) -> Result<(), WeatherError> {
        let city = self.services.geocoder.resolve_city_name(at).await;
        let report = self.services.forecast.fetch_weather(at).await?;
        self.render(&city, &report);
        self.remember(&city);
        Ok(())
    }

    fn render(&mut self, city: &str, report: &WeatherReport) {
        tracing::info!(city, "weather loaded");
        self.presenter.render_current(city, &report.current);
        self.presenter.render_forecast(report.upcoming());
    }

    fn remember(&mut self, city: &str) {
        if self.recent.record(city) {
            self.presenter.render_recent(self.recent.list());
        }
    }

    fn begin_loading(&mut self) {
        self.phase = SearchPhase::Loading;
        self.presenter.show_loading();
    }

    fn finish_loading(&mut self) {
        self.presenter.hide_loading();
        self.phase = SearchPhase::Idle;
    }
}

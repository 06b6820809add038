//! Writes search results, banners and suggestions into a [`Surface`].
//!
//! Timed elements (the error banner and the invalid-input cue) record a
//! deadline instead of owning a timer; [`Presenter::tick`] applies any that
//! have passed. Time comes from `tokio::time`, so a paused runtime clock
//! drives them in tests.

use std::time::Duration;
use tokio::time::Instant;

use crate::{
    conditions,
    model::{CurrentConditions, ForecastDay},
    ui::{ElementId, ForecastCard, Node, Surface},
};

/// How long an error stays on screen after the most recent one.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

/// How long the input field is flagged after a rejected entry.
pub const INVALID_CUE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Presenter<S: Surface> {
    surface: S,
    error_until: Option<Instant>,
    invalid_until: Option<Instant>,
}

impl<S: Surface> Presenter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, error_until: None, invalid_until: None }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn render_current(&mut self, city: &str, current: &CurrentConditions) {
        let condition = conditions::lookup(current.weather_code);
        let s = &mut self.surface;

        s.set_text(ElementId::CurrentCity, city);
        s.set_text(ElementId::CurrentDate, &long_date(current));
        s.set_text(ElementId::CurrentIcon, condition.icon);
        s.set_text(ElementId::CurrentTemp, &format!("{}°C", whole(current.temperature)));
        s.set_text(ElementId::CurrentDescription, condition.description);
        s.set_text(ElementId::FeelsLike, &format!("{}°C", whole(current.apparent_temperature)));
        s.set_text(ElementId::CurrentHumidity, &format!("{}%", whole(current.humidity)));
        s.set_text(ElementId::CurrentWindSpeed, &format!("{} km/h", whole(current.wind_speed)));
        s.set_text(
            ElementId::CurrentVisibility,
            &format!("{} km", whole(current.visibility / 1000.0)),
        );
        s.set_text(ElementId::CurrentPressure, &format!("{} hPa", whole(current.surface_pressure)));

        s.set_visible(ElementId::CurrentWeather, true);
    }

    /// Replace the forecast strip with one card per given day.
    pub fn render_forecast(&mut self, days: &[ForecastDay]) {
        self.surface.clear_children(ElementId::ForecastContainer);
        for day in days {
            self.surface
                .append_child(ElementId::ForecastContainer, Node::Forecast(forecast_card(day)));
        }
        self.surface.set_visible(ElementId::ForecastSection, true);
    }

    pub fn render_recent(&mut self, cities: &[String]) {
        self.surface.clear_children(ElementId::RecentCitiesList);
        for city in cities {
            self.surface
                .append_child(ElementId::RecentCitiesList, Node::RecentCity(city.clone()));
        }
    }

    /// Open the suggestion panel. Does nothing when there is nothing to suggest.
    pub fn show_recent(&mut self, cities: &[String]) {
        if cities.is_empty() {
            return;
        }
        self.render_recent(cities);
        self.surface.set_visible(ElementId::RecentCitiesDropdown, true);
    }

    pub fn hide_recent(&mut self) {
        self.surface.set_visible(ElementId::RecentCitiesDropdown, false);
    }

    /// Show `message` in the banner and restart its countdown.
    pub fn show_error(&mut self, message: &str) {
        self.surface.set_text(ElementId::ErrorMessage, message);
        self.surface.set_visible(ElementId::ErrorMessage, true);
        self.error_until = Some(Instant::now() + ERROR_DISPLAY);
    }

    pub fn hide_error(&mut self) {
        self.surface.set_visible(ElementId::ErrorMessage, false);
        self.error_until = None;
    }

    pub fn flag_invalid_input(&mut self) {
        self.surface.set_invalid(ElementId::CityInput, true);
        self.invalid_until = Some(Instant::now() + INVALID_CUE);
    }

    pub fn show_loading(&mut self) {
        self.surface.set_visible(ElementId::LoadingSpinner, true);
        self.surface.set_visible(ElementId::CurrentWeather, false);
        self.surface.set_visible(ElementId::ForecastSection, false);
    }

    pub fn hide_loading(&mut self) {
        self.surface.set_visible(ElementId::LoadingSpinner, false);
    }

    pub fn set_input(&mut self, text: &str) {
        self.surface.set_text(ElementId::CityInput, text);
    }

    /// Expire timed elements whose deadline has passed.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.error_until.is_some_and(|t| now >= t) {
            self.hide_error();
        }
        if self.invalid_until.is_some_and(|t| now >= t) {
            self.surface.set_invalid(ElementId::CityInput, false);
            self.invalid_until = None;
        }
    }

    /// Earliest pending deadline, for front ends that want to sleep until it.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.error_until, self.invalid_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn forecast_card(day: &ForecastDay) -> ForecastCard {
    let condition = conditions::lookup(day.weather_code);
    ForecastCard {
        date: day.date.format("%a, %b %-d").to_string(),
        icon: condition.icon.to_string(),
        max: format!("{}°", whole(day.temp_max)),
        min: format!("{}°", whole(day.temp_min)),
        humidity: format!("💧 {}%", whole(day.humidity_max)),
        wind: format!("💨 {} km/h", whole(day.wind_speed_max)),
    }
}

fn long_date(current: &CurrentConditions) -> String {
    current.observed_at.format("%A, %B %-d, %Y").to_string()
}

/// Round half up, the way browsers display these values. Missing readings
/// show as `--`.
pub fn whole(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    let rounded = (value + 0.5).floor() as i64;
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Page;
    use chrono::NaiveDate;

    fn current(temperature: f64) -> CurrentConditions {
        CurrentConditions {
            temperature,
            apparent_temperature: 13.6,
            humidity: 72.0,
            wind_speed: 11.5,
            visibility: 24_140.0,
            surface_pressure: 1012.44,
            weather_code: 2,
            observed_at: NaiveDate::from_ymd_opt(2025, 1, 7)
                .unwrap()
                .and_hms_opt(14, 15, 0)
                .unwrap(),
        }
    }

    fn day(d: u32, code: i32) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            weather_code: code,
            temp_max: 9.5,
            temp_min: -0.4,
            humidity_max: 88.0,
            wind_speed_max: 20.49,
        }
    }

    #[test]
    fn whole_rounds_half_up() {
        assert_eq!(whole(15.4), "15");
        assert_eq!(whole(15.5), "16");
        assert_eq!(whole(-2.5), "-2");
        assert_eq!(whole(-0.4), "0");
        assert_eq!(whole(f64::NAN), "--");
    }

    #[test]
    fn current_conditions_are_formatted() {
        let mut p = Presenter::new(Page::new());
        p.render_current("Paris", &current(15.4));
        let page = p.surface();

        assert_eq!(page.text(ElementId::CurrentCity), "Paris");
        assert_eq!(page.text(ElementId::CurrentDate), "Tuesday, January 7, 2025");
        assert_eq!(page.text(ElementId::CurrentIcon), "⛅");
        assert_eq!(page.text(ElementId::CurrentDescription), "Partly cloudy");
        assert_eq!(page.text(ElementId::CurrentTemp), "15°C");
        assert_eq!(page.text(ElementId::FeelsLike), "14°C");
        assert_eq!(page.text(ElementId::CurrentHumidity), "72%");
        assert_eq!(page.text(ElementId::CurrentWindSpeed), "12 km/h");
        assert_eq!(page.text(ElementId::CurrentVisibility), "24 km");
        assert_eq!(page.text(ElementId::CurrentPressure), "1012 hPa");
        assert!(page.is_visible(ElementId::CurrentWeather));
    }

    #[test]
    fn unknown_code_renders_as_clear_sky() {
        let mut p = Presenter::new(Page::new());
        let mut c = current(1.0);
        c.weather_code = 42;
        p.render_current("X", &c);
        assert_eq!(p.surface().text(ElementId::CurrentDescription), "Clear sky");
    }

    #[test]
    fn forecast_cards_replace_previous_ones() {
        let mut p = Presenter::new(Page::new());
        p.render_forecast(&[day(2, 0), day(3, 0)]);
        p.render_forecast(&[day(8, 95)]);

        let cards = p.surface().children(ElementId::ForecastContainer);
        assert_eq!(
            cards,
            [Node::Forecast(ForecastCard {
                date: "Wed, Jan 8".into(),
                icon: "⛈️".into(),
                max: "10°".into(),
                min: "0°".into(),
                humidity: "💧 88%".into(),
                wind: "💨 20 km/h".into(),
            })]
        );
        assert!(p.surface().is_visible(ElementId::ForecastSection));
    }

    #[test]
    fn loading_hides_results() {
        let mut p = Presenter::new(Page::new());
        p.render_current("Paris", &current(15.4));
        p.render_forecast(&[day(2, 0)]);

        p.show_loading();
        let page = p.surface();
        assert!(page.is_visible(ElementId::LoadingSpinner));
        assert!(!page.is_visible(ElementId::CurrentWeather));
        assert!(!page.is_visible(ElementId::ForecastSection));

        p.hide_loading();
        assert!(!p.surface().is_visible(ElementId::LoadingSpinner));
    }

    #[test]
    fn recent_panel_stays_closed_when_empty() {
        let mut p = Presenter::new(Page::new());
        p.show_recent(&[]);
        assert!(!p.surface().is_visible(ElementId::RecentCitiesDropdown));

        p.show_recent(&["Oslo".to_string()]);
        assert!(p.surface().is_visible(ElementId::RecentCitiesDropdown));
        assert_eq!(
            p.surface().children(ElementId::RecentCitiesList),
            [Node::RecentCity("Oslo".into())]
        );

        p.hide_recent();
        assert!(!p.surface().is_visible(ElementId::RecentCitiesDropdown));
    }

    #[tokio::test(start_paused = true)]
    async fn error_banner_hides_after_five_seconds() {
        let mut p = Presenter::new(Page::new());
        p.show_error("boom");
        assert!(p.surface().is_visible(ElementId::ErrorMessage));

        tokio::time::advance(Duration::from_millis(4_999)).await;
        p.tick();
        assert!(p.surface().is_visible(ElementId::ErrorMessage));

        tokio::time::advance(Duration::from_millis(1)).await;
        p.tick();
        assert!(!p.surface().is_visible(ElementId::ErrorMessage));
        assert_eq!(p.next_deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_error_restarts_the_countdown() {
        let mut p = Presenter::new(Page::new());
        p.show_error("first");

        tokio::time::advance(Duration::from_secs(3)).await;
        p.show_error("second");

        tokio::time::advance(Duration::from_secs(3)).await;
        p.tick();
        assert!(p.surface().is_visible(ElementId::ErrorMessage));
        assert_eq!(p.surface().text(ElementId::ErrorMessage), "second");

        tokio::time::advance(Duration::from_secs(2)).await;
        p.tick();
        assert!(!p.surface().is_visible(ElementId::ErrorMessage));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_cue_clears_after_half_a_second() {
        let mut p = Presenter::new(Page::new());
        p.flag_invalid_input();
        assert!(p.surface().is_invalid(ElementId::CityInput));

        tokio::time::advance(INVALID_CUE).await;
        p.tick();
        assert!(!p.surface().is_invalid(ElementId::CityInput));
    }
}

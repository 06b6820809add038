//! Terminal rendering of the page model.

use std::fmt::Write as _;

use weather_core::{
    ElementId, Page,
    ui::{ForecastCard, Node},
};

pub fn print_page(page: &Page) {
    let (out, err) = page_text(page);
    if !err.is_empty() {
        eprint!("{err}");
    }
    print!("{out}");
}

/// Split the visible page into stdout and stderr text.
fn page_text(page: &Page) -> (String, String) {
    let mut out = String::new();
    let mut err = String::new();

    if page.is_visible(ElementId::ErrorMessage) {
        let _ = writeln!(err, "⚠  {}", page.text(ElementId::ErrorMessage));
    }

    if page.is_visible(ElementId::CurrentWeather) {
        let t = |id| page.text(id);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  ({})", t(ElementId::CurrentCity), t(ElementId::CurrentDate));
        let _ = writeln!(
            out,
            "{}  {}  {}",
            t(ElementId::CurrentIcon),
            t(ElementId::CurrentTemp),
            t(ElementId::CurrentDescription)
        );
        let _ = writeln!(
            out,
            "Feels like {} | Humidity {} | Wind {} | Visibility {} | Pressure {}",
            t(ElementId::FeelsLike),
            t(ElementId::CurrentHumidity),
            t(ElementId::CurrentWindSpeed),
            t(ElementId::CurrentVisibility),
            t(ElementId::CurrentPressure),
        );
    }

    if page.is_visible(ElementId::ForecastSection) {
        let _ = writeln!(out);
        let _ = writeln!(out, "5-day forecast");
        for node in page.children(ElementId::ForecastContainer) {
            if let Node::Forecast(card) = node {
                let _ = writeln!(out, "{}", forecast_line(card));
            }
        }
    }

    if page.is_visible(ElementId::RecentCitiesDropdown) {
        let cities: Vec<&str> = page
            .children(ElementId::RecentCitiesList)
            .iter()
            .filter_map(|node| match node {
                Node::RecentCity(city) => Some(city.as_str()),
                Node::Forecast(_) => None,
            })
            .collect();
        let _ = writeln!(out, "Recent: {}", cities.join(", "));
    }

    (out, err)
}

fn forecast_line(card: &ForecastCard) -> String {
    format!(
        "{:<12} {}  {:>4} / {:<4}  {:<8} {}",
        card.date, card.icon, card.max, card.min, card.humidity, card.wind
    )
}

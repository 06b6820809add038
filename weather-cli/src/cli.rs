use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use weather_core::{
    Config, Coordinates, Page, RecentCities, WeatherApp,
    recent::FileStore,
};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast from Open-Meteo")]
pub struct Cli {
    /// Log requests and fallbacks to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure endpoints, history and the home position.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Paris" or "St. Louis".
        city: String,
    },

    /// Show weather for the current position.
    Here {
        /// Latitude; defaults to the configured home position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured home position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Search repeatedly, with recent cities offered as suggestions.
    Interactive,

    /// List remembered searches.
    Recent,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut app = WeatherApp::from_config(&Config::load()?, Page::new())?;
                app.set_input(&city);
                app.search_by_name().await?;
                render::print_page(app.surface());
                Ok(())
            }
            Command::Here { lat, lon } => {
                let mut config = Config::load()?;
                if let (Some(latitude), Some(longitude)) = (lat, lon) {
                    config.set_home(Some(Coordinates::new(latitude, longitude)));
                }
                let mut app = WeatherApp::from_config(&config, Page::new())?;
                app.search_current_location().await?;
                render::print_page(app.surface());
                Ok(())
            }
            Command::Interactive => {
                let app = WeatherApp::from_config(&Config::load()?, Page::new())?;
                session::run(app).await
            }
            Command::Recent => list_recent(),
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    config.geocoding_url = Text::new("Geocoding API base URL:")
        .with_default(&config.geocoding_url)
        .prompt()?;
    config.forecast_url = Text::new("Forecast API base URL:")
        .with_default(&config.forecast_url)
        .prompt()?;
    config.timeout_secs = CustomType::<u64>::new("Request timeout in seconds:")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    config.persist_recent = Confirm::new("Remember recent searches between runs?")
        .with_default(config.persist_recent)
        .prompt()?;

    let current_home = config
        .home
        .map(|c| format!("{},{}", c.latitude, c.longitude))
        .unwrap_or_default();
    let home = Text::new("Home position as \"lat,lon\" (blank for none):")
        .with_default(&current_home)
        .prompt()?;
    config.set_home(parse_coordinates(&home)?);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn list_recent() -> Result<()> {
    let config = Config::load()?;
    if !config.persist_recent {
        println!("Recent searches are kept for the session only.");
        println!("Hint: run `weather configure` to remember them between runs.");
        return Ok(());
    }

    let recent = RecentCities::new(Box::new(FileStore::new(Config::recent_file_path()?)));
    if recent.is_empty() {
        println!("No recent searches.");
    }
    for city in recent.list() {
        println!("{city}");
    }
    Ok(())
}

/// Parse `"lat,lon"`; blank input means no position.
fn parse_coordinates(input: &str) -> Result<Option<Coordinates>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected \"lat,lon\", got {input:?}"))?;
    let latitude: f64 = lat.trim().parse().with_context(|| format!("Invalid latitude {lat:?}"))?;
    let longitude: f64 =
        lon.trim().parse().with_context(|| format!("Invalid longitude {lon:?}"))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(anyhow!("Position {latitude},{longitude} is out of range"));
    }
    Ok(Some(Coordinates::new(latitude, longitude)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        assert_eq!(
            parse_coordinates(" 48.85, 2.35 ").unwrap(),
            Some(Coordinates::new(48.85, 2.35))
        );
        assert_eq!(parse_coordinates("").unwrap(), None);
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(parse_coordinates("48.85").is_err());
        assert!(parse_coordinates("north,east").is_err());
        assert!(parse_coordinates("91,0").is_err());
    }

    #[test]
    fn here_flags_come_in_pairs() {
        assert!(Cli::try_parse_from(["weather", "here", "--lat", "1.0"]).is_err());
        let cli = Cli::try_parse_from(["weather", "here", "--lat", "-33.9", "--lon", "151.2"]).unwrap();
        assert!(matches!(cli.command, Command::Here { lat: Some(_), lon: Some(_) }));
    }
}

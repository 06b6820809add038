//! Interactive loop: one prompt per search, recent cities as completions.

use anyhow::Result;
use inquire::{
    CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use weather_core::{Page, WeatherApp};

use crate::render;

const HERE: &str = ":here";
const QUIT: &str = ":quit";

/// Completes from recent cities, matching case-insensitively by prefix.
#[derive(Debug, Clone)]
struct RecentSuggester {
    cities: Vec<String>,
}

impl Autocomplete for RecentSuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let needle = input.trim().to_lowercase();
        Ok(self
            .cities
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&needle))
            .cloned()
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run(mut app: WeatherApp<Page>) -> Result<()> {
    println!("Type a city name, `{HERE}` for your position, or `{QUIT}` to leave.");

    loop {
        app.tick();
        app.focus_input();

        let prompt = Text::new("City:")
            .with_autocomplete(RecentSuggester { cities: app.recent().to_vec() })
            .prompt();

        let line = match prompt {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        app.click_outside();

        let outcome = match line.trim() {
            QUIT => break,
            HERE => app.search_current_location().await,
            city if app.recent().iter().any(|c| c == city) => app.select_recent(city).await,
            _ => {
                app.set_input(&line);
                app.search_by_name().await
            }
        };

        if let Err(err) = &outcome {
            tracing::debug!(%err, "search ended with an error");
        }
        render::print_page(app.surface());
    }

    Ok(())
}

use crate::error::WeatherError;

pub const MIN_CITY_LEN: usize = 2;

/// Check a typed city name and return it trimmed.
///
/// Accepts ASCII letters, whitespace, and `-` `'` `.` `,`.
pub fn city_name(input: &str) -> Result<&str, WeatherError> {
    let city = input.trim();

    if city.is_empty() {
        return Err(WeatherError::Validation("Please enter a city name".into()));
    }
    if city.chars().count() < MIN_CITY_LEN {
        return Err(WeatherError::Validation(
            "City name must be at least 2 characters long".into(),
        ));
    }
    if !city.chars().all(is_city_char) {
        return Err(WeatherError::Validation(
            "Please enter a valid city name (letters, spaces, hyphens, and apostrophes only)"
                .into(),
        ));
    }

    Ok(city)
}

fn is_city_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.' | ',')
}

//! WMO weather codes as reported by Open-Meteo, mapped to an icon and a
//! short description.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// A single entry of the weather code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub code: u8,
    pub icon: &'static str,
    pub description: &'static str,
}

const fn entry(code: u8, icon: &'static str, description: &'static str) -> WeatherCondition {
    WeatherCondition { code, icon, description }
}

static CONDITIONS: [WeatherCondition; 28] = [
    entry(0, "☀️", "Clear sky"),
    entry(1, "🌤️", "Mainly clear"),
    entry(2, "⛅", "Partly cloudy"),
    entry(3, "☁️", "Overcast"),
    entry(45, "🌫️", "Fog"),
    entry(48, "🌫️", "Depositing rime fog"),
    entry(51, "🌦️", "Light drizzle"),
    entry(53, "🌦️", "Moderate drizzle"),
    entry(55, "🌦️", "Dense drizzle"),
    entry(56, "🌦️", "Light freezing drizzle"),
    entry(57, "🌦️", "Dense freezing drizzle"),
    entry(61, "🌧️", "Slight rain"),
    entry(63, "🌧️", "Moderate rain"),
    entry(65, "🌧️", "Heavy rain"),
    entry(66, "🌧️", "Light freezing rain"),
    entry(67, "🌧️", "Heavy freezing rain"),
    entry(71, "🌨️", "Slight snow fall"),
    entry(73, "🌨️", "Moderate snow fall"),
    entry(75, "🌨️", "Heavy snow fall"),
    entry(77, "🌨️", "Snow grains"),
    entry(80, "🌦️", "Slight rain showers"),
    entry(81, "🌦️", "Moderate rain showers"),
    entry(82, "🌦️", "Violent rain showers"),
    entry(85, "🌨️", "Slight snow showers"),
    entry(86, "🌨️", "Heavy snow showers"),
    entry(95, "⛈️", "Thunderstorm"),
    entry(96, "⛈️", "Thunderstorm with slight hail"),
    entry(99, "⛈️", "Thunderstorm with heavy hail"),
];

/// Look up a weather code. Unknown codes fall back to "Clear sky" (code 0).
pub fn lookup(code: i32) -> &'static WeatherCondition {
    CONDITIONS
        .iter()
        .find(|c| i32::from(c.code) == code)
        .unwrap_or(&CONDITIONS[0])
}

/// Every known condition, ordered by code.
pub fn all() -> &'static [WeatherCondition] {
    &CONDITIONS
}

//! Error taxonomy for a single search attempt.
//!
//! Every variant renders as the one line shown to the user; none of them is
//! retried.

use thiserror::Error;

/// Shown when an error carries no message of its own.
pub const GENERIC_FAILURE: &str = "Failed to fetch weather data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Bad user input. No network call was made.
    #[error("{0}")]
    Validation(String),

    /// The geocoding service returned no match.
    #[error("{0}")]
    NotFound(String),

    /// The request failed or came back with a non-success status.
    #[error("{0}")]
    Transport(String),

    /// The response could not be decoded or lacked a required section.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Geolocation(#[from] GeolocationError),
}

impl WeatherError {
    /// Message for the error banner, falling back to `fallback` when empty.
    pub fn user_message(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() { fallback.to_string() } else { msg }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::MalformedResponse(format!("Invalid weather data received: {err}"))
    }
}

/// Classified failure of a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Failed to get your location. Please allow location access.")]
    PermissionDenied,
    #[error("Failed to get your location. Location information unavailable.")]
    PositionUnavailable,
    #[error("Failed to get your location. Location request timed out.")]
    Timeout,
    #[error("Failed to get your location. Unknown error occurred.")]
    Unknown,
    #[error("Geolocation is not supported on this device")]
    Unsupported,
}

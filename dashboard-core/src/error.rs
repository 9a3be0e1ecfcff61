use thiserror::Error;

/// Faults surfaced to the dashboard's error slot.
///
/// Geolocation failures are not listed here: they are absorbed by the
/// location resolver, which falls back to the configured coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Location not found")]
    LocationNotFound,

    #[error("{0}")]
    SearchFailed(String),

    #[error("Weather API error: {status}")]
    WeatherApi { status: u16 },

    /// Network-level failure; the detail is logged, the message stays generic.
    #[error("Failed to load weather data")]
    ForecastTransport(String),

    #[error("Unexpected response from weather API")]
    ForecastDecode(String),

    #[error("Failed to initialize HTTP client: {0}")]
    Client(String),
}

impl DashboardError {
    /// Underlying detail for logging, where the user-facing message hides it.
    pub fn detail(&self) -> Option<&str> {
        match self {
            DashboardError::ForecastTransport(detail) | DashboardError::ForecastDecode(detail) => {
                Some(detail)
            }
            _ => None,
        }
    }
}

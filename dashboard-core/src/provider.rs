use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::DashboardError,
    model::{Coordinate, WeatherSnapshot},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of forecast snapshots for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_weather_data(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, DashboardError>;
}

/// Free-text place-name lookup.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best single match for `query`, or `None` when the service knows no such place.
    ///
    /// Callers pass a trimmed, non-empty query.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, DashboardError>;
}

/// `"<place>, <country>"` when the country is known, otherwise just the place.
pub fn place_label(name: &str, country: Option<&str>) -> String {
    match country.map(str::trim).filter(|c| !c.is_empty()) {
        Some(country) => format!("{name}, {country}"),
        None => name.to_string(),
    }
}

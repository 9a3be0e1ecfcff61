//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Location resolution (geolocation with fallback, place-name search)
//! - Forecast fetching from Open-Meteo and normalization into snapshots
//! - Unit conversion, formatting and the weather-code table
//! - Widget descriptors and the dashboard state container
//!
//! It is used by `dashboard-cli`, but any front end can drive [`Dashboard`]
//! and render the [`widgets::DashboardWidget`] values it produces.

pub mod codes;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod units;
pub mod widgets;

pub use config::{Config, EndpointConfig, GeolocationConfig};
pub use dashboard::{Dashboard, DashboardState, RequestTicket};
pub use error::DashboardError;
pub use location::{Geolocator, LocationError, resolve_location, search_location_by_name};
pub use model::{
    Coordinate, CurrentWeather, DailyForecast, HourlyForecast, SnapshotLocation, TemperatureUnit,
    WeatherSnapshot,
};
pub use provider::{ForecastProvider, Geocoder, OpenMeteoClient};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::EndpointConfig,
    error::DashboardError,
    forecast::{self, ForecastResponse},
    model::{Coordinate, WeatherSnapshot},
};

use super::{ForecastProvider, Geocoder, place_label};

/// Client for the Open-Meteo forecast and geocoding APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs))
            .build()
            .map_err(|e| DashboardError::Client(e.to_string()))?;

        Ok(Self {
            http,
            forecast_url: endpoints.forecast_url.clone(),
            geocoding_url: endpoints.geocoding_url.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn fetch_weather_data(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, DashboardError> {
        let res = self
            .http
            .get(&self.forecast_url)
            .query(&forecast::forecast_query(latitude, longitude))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "forecast request failed");
                DashboardError::ForecastTransport(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "forecast endpoint returned an error status");
            return Err(DashboardError::WeatherApi { status: status.as_u16() });
        }

        let body = res
            .text()
            .await
            .map_err(|e| DashboardError::ForecastTransport(e.to_string()))?;

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "forecast response did not decode");
            DashboardError::ForecastDecode(e.to_string())
        })?;

        let snapshot = forecast::normalize(parsed, latitude, longitude);
        debug!(
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            timezone = %snapshot.location.timezone,
            "forecast normalized"
        );

        Ok(snapshot)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, DashboardError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", query), ("count", "1")])
            .send()
            .await
            .map_err(|e| DashboardError::SearchFailed(format!("Failed to search location: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            return Err(DashboardError::SearchFailed(format!(
                "Failed to search location (HTTP {})",
                status.as_u16()
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| DashboardError::SearchFailed(format!("Failed to search location: {e}")))?;

        let parsed: GeocodingResponse = serde_json::from_str(&body).map_err(|e| {
            DashboardError::SearchFailed(format!("Failed to read geocoding response: {e}"))
        })?;

        let found = parsed.results.unwrap_or_default().into_iter().next().map(|r| {
            Coordinate::new(r.latitude, r.longitude, place_label(&r.name, r.country.as_deref()))
        });

        debug!(found = found.is_some(), "geocoding finished");
        Ok(found)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

//! Location resolution: device geolocation with a bounded wait and a static
//! fallback, plus free-text search through a [`Geocoder`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{
    config::GeolocationConfig,
    error::DashboardError,
    model::{CURRENT_LOCATION_NAME, Coordinate},
    provider::Geocoder,
};

/// Why geolocation produced no position. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Device position as (latitude, longitude).
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<(f64, f64), LocationError>;
}

/// Geolocation switched off; always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

#[async_trait]
impl Geolocator for DisabledGeolocator {
    async fn locate(&self) -> Result<(f64, f64), LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Approximate position from the public IP address (ip-api.com JSON format).
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    http: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

impl IpGeolocator {
    pub fn new(config: &GeolocationConfig) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DashboardError::Client(e.to_string()))?;

        Ok(Self { http, url: config.url.clone() })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<(f64, f64), LocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { LocationError::Timeout } else { LocationError::Unavailable })?;

        let status = res.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::Other(format!("HTTP {status}")));
        }

        let body: IpApiResponse =
            res.json().await.map_err(|e| LocationError::Other(e.to_string()))?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(LocationError::Other(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            )),
        }
    }
}

/// Build the geolocator the config asks for.
pub fn geolocator_from_config(
    config: &GeolocationConfig,
) -> Result<Box<dyn Geolocator>, DashboardError> {
    if !config.enabled {
        return Ok(Box::new(DisabledGeolocator));
    }
    Ok(Box::new(IpGeolocator::new(config)?))
}

/// Resolve the active coordinate.
///
/// Waits at most `timeout` for the geolocator and returns `fallback` on any
/// failure, so this always produces a coordinate.
pub async fn resolve_location(
    geolocator: &dyn Geolocator,
    fallback: &Coordinate,
    timeout: Duration,
) -> Coordinate {
    let span = info_span!("location.resolve", timeout_secs = timeout.as_secs());

    async move {
        let outcome = match tokio::time::timeout(timeout, geolocator.locate()).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        };

        match outcome {
            Ok((latitude, longitude)) => {
                info!(lat = latitude, lon = longitude, "geolocation succeeded");
                Coordinate::new(latitude, longitude, CURRENT_LOCATION_NAME)
            }
            Err(e) => {
                warn!(error = %e, fallback = %fallback.name, "geolocation failed; using fallback");
                fallback.clone()
            }
        }
    }
    .instrument(span)
    .await
}

/// Look up a place by name.
///
/// A blank query is ignored: `Ok(None)`, and the geocoder is not called.
pub async fn search_location_by_name(
    geocoder: &dyn Geocoder,
    query: &str,
) -> Result<Option<Coordinate>, DashboardError> {
    let query = query.trim();
    if query.is_empty() {
        debug!("ignoring blank location search");
        return Ok(None);
    }

    match geocoder.geocode(query).await? {
        Some(found) => {
            info!(query, name = %found.name, "location search resolved");
            Ok(Some(found))
        }
        None => Err(DashboardError::LocationNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedGeolocator(Result<(f64, f64), LocationError>);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn locate(&self) -> Result<(f64, f64), LocationError> {
            self.0.clone()
        }
    }

    #[derive(Debug)]
    struct HangingGeolocator;

    #[async_trait]
    impl Geolocator for HangingGeolocator {
        async fn locate(&self) -> Result<(f64, f64), LocationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok((1.0, 1.0))
        }
    }

    #[derive(Debug, Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
        answer: Option<Coordinate>,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _query: &str) -> Result<Option<Coordinate>, DashboardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn geolocation_success_is_named_current_location() {
        let geo = FixedGeolocator(Ok((48.85, 2.35)));
        let coord = resolve_location(&geo, &Coordinate::san_francisco(), TIMEOUT).await;

        assert_eq!(coord, Coordinate::new(48.85, 2.35, "Current Location"));
    }

    #[tokio::test]
    async fn denied_geolocation_falls_back() {
        let geo = FixedGeolocator(Err(LocationError::PermissionDenied));
        let coord = resolve_location(&geo, &Coordinate::san_francisco(), TIMEOUT).await;

        assert_eq!(coord, Coordinate::san_francisco());
    }

    #[tokio::test]
    async fn disabled_geolocation_falls_back() {
        let fallback = Coordinate::new(40.7128, -74.006, "New York");
        let coord = resolve_location(&DisabledGeolocator, &fallback, TIMEOUT).await;

        assert_eq!(coord, fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_geolocation_is_cut_off_at_timeout() {
        let started = tokio::time::Instant::now();
        let coord = resolve_location(&HangingGeolocator, &Coordinate::san_francisco(), TIMEOUT).await;

        assert_eq!(coord, Coordinate::san_francisco());
        assert!(started.elapsed() <= TIMEOUT + Duration::from_millis(10));
    }

    #[tokio::test]
    async fn blank_search_makes_no_call() {
        let geocoder = CountingGeocoder::default();

        assert_eq!(search_location_by_name(&geocoder, "").await, Ok(None));
        assert_eq!(search_location_by_name(&geocoder, "   ").await, Ok(None));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_without_match_is_not_found() {
        let geocoder = CountingGeocoder::default();

        let err = search_location_by_name(&geocoder, "Nowhere").await.unwrap_err();
        assert_eq!(err, DashboardError::LocationNotFound);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_returns_match() {
        let paris = Coordinate::new(48.85, 2.35, "Paris, France");
        let geocoder = CountingGeocoder { answer: Some(paris.clone()), ..Default::default() };

        let found = search_location_by_name(&geocoder, "  Paris ").await.unwrap();
        assert_eq!(found, Some(paris));
    }

    #[test]
    fn disabled_config_builds_disabled_geolocator() {
        let config = GeolocationConfig { enabled: false, ..Default::default() };
        let geo = geolocator_from_config(&config).unwrap();
        assert!(format!("{geo:?}").contains("DisabledGeolocator"));
    }
}

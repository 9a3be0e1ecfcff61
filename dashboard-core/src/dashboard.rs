//! Dashboard state and the controller that drives resolve -> fetch -> commit.
//!
//! [`DashboardState`] only changes through its transition methods. A snapshot
//! and the coordinate it belongs to are committed together; a failure sets the
//! error slot and leaves the last good snapshot in place.

use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::{
    config::Config,
    error::DashboardError,
    location::{Geolocator, geolocator_from_config, resolve_location, search_location_by_name},
    model::{Coordinate, TemperatureUnit, WeatherSnapshot},
    provider::{ForecastProvider, Geocoder, OpenMeteoClient},
    widgets::{
        DashboardWidget, Intent, current_weather_widget, daily_forecast_widget,
        hourly_forecast_widget, location_widget,
    },
};

/// Name shown before any location has been resolved.
pub const UNKNOWN_LOCATION_NAME: &str = "Unknown Location";

/// Identifies one in-flight request; completions carrying an older
/// generation than the latest request are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub location: Option<Coordinate>,
    pub snapshot: Option<WeatherSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub unit: TemperatureUnit,
    generation: u64,
}

impl DashboardState {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self { unit, ..Default::default() }
    }

    /// Start a request: set loading, clear the error slot.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        RequestTicket { generation: self.generation }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Commit a coordinate and its snapshot. Returns false for a stale ticket.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        location: Coordinate,
        snapshot: WeatherSnapshot,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.location = Some(location);
        self.snapshot = Some(snapshot);
        self.loading = false;
        true
    }

    /// Record a failure. The previous snapshot stays. Returns false for a stale ticket.
    pub fn fail(&mut self, ticket: RequestTicket, error: &DashboardError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.error = Some(error.to_string());
        self.loading = false;
        true
    }

    /// End a request that produced nothing to commit (a blank search).
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn location_name(&self) -> &str {
        self.location.as_ref().map_or(UNKNOWN_LOCATION_NAME, |l| l.name.as_str())
    }

    /// All four widget descriptors, in grid order.
    pub fn widgets(&self) -> Vec<DashboardWidget> {
        let snapshot = self.snapshot.as_ref();
        let error = self.error.as_deref();

        vec![
            DashboardWidget::Current(current_weather_widget(
                snapshot.map(|s| &s.current),
                self.loading,
                error,
                self.unit,
            )),
            DashboardWidget::Location(location_widget(
                snapshot,
                self.loading,
                error,
                self.location_name(),
                self.unit,
                Intent::RefreshLocation,
            )),
            DashboardWidget::Hourly(hourly_forecast_widget(
                snapshot.map(|s| &s.hourly),
                self.loading,
                error,
                self.unit,
            )),
            DashboardWidget::Daily(daily_forecast_widget(
                snapshot.map(|s| &s.daily),
                self.loading,
                error,
                self.unit,
            )),
        ]
    }
}

/// Owns the providers and the state; one method per user intent.
///
/// The state lock is never held across an await, so intents may overlap.
#[derive(Debug)]
pub struct Dashboard {
    forecasts: Arc<dyn ForecastProvider>,
    geocoder: Arc<dyn Geocoder>,
    geolocator: Arc<dyn Geolocator>,
    fallback: Coordinate,
    geolocation_timeout: Duration,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(
        forecasts: Arc<dyn ForecastProvider>,
        geocoder: Arc<dyn Geocoder>,
        geolocator: Arc<dyn Geolocator>,
        fallback: Coordinate,
        geolocation_timeout: Duration,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            forecasts,
            geocoder,
            geolocator,
            fallback,
            geolocation_timeout,
            state: Mutex::new(DashboardState::new(unit)),
        }
    }

    /// Wire up Open-Meteo and the configured geolocator.
    pub fn from_config(config: &Config) -> Result<Self, DashboardError> {
        let client = Arc::new(OpenMeteoClient::new(&config.endpoints)?);
        let geolocator: Arc<dyn Geolocator> = Arc::from(geolocator_from_config(&config.geolocation)?);

        Ok(Self::new(
            client.clone(),
            client,
            geolocator,
            config.fallback_location.clone(),
            config.geolocation.timeout(),
            config.unit,
        ))
    }

    /// A copy of the current state.
    pub fn state(&self) -> DashboardState {
        self.state.lock().clone()
    }

    pub fn widgets(&self) -> Vec<DashboardWidget> {
        self.state.lock().widgets()
    }

    /// Resolve the device location (or fallback), then fetch its forecast.
    pub async fn load_current_location(&self) {
        let ticket = self.state.lock().begin_request();
        let location =
            resolve_location(self.geolocator.as_ref(), &self.fallback, self.geolocation_timeout)
                .await;
        self.fetch_and_commit(ticket, location).await;
    }

    /// Refetch the active coordinate; resolves one first if there is none yet.
    pub async fn refresh(&self) {
        let active = self.state.lock().location.clone();
        match active {
            Some(location) => {
                let ticket = self.state.lock().begin_request();
                self.fetch_and_commit(ticket, location).await;
            }
            None => self.load_current_location().await,
        }
    }

    /// Geocode `query` and fetch the forecast there. A blank query does nothing.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            return;
        }

        let ticket = self.state.lock().begin_request();
        match search_location_by_name(self.geocoder.as_ref(), query).await {
            Ok(Some(location)) => self.fetch_and_commit(ticket, location).await,
            Ok(None) => {
                self.state.lock().settle(ticket);
            }
            Err(e) => self.record_failure(ticket, &e),
        }
    }

    pub fn set_unit(&self, unit: TemperatureUnit) {
        self.state.lock().set_unit(unit);
    }

    pub fn dismiss_error(&self) {
        self.state.lock().dismiss_error();
    }

    /// Run an intent coming back from a widget action.
    pub async fn apply(&self, intent: Intent) {
        match intent {
            Intent::RefreshLocation => self.load_current_location().await,
            Intent::SetUnit(unit) => self.set_unit(unit),
        }
    }

    async fn fetch_and_commit(&self, ticket: RequestTicket, location: Coordinate) {
        match self.forecasts.fetch_weather_data(location.latitude, location.longitude).await {
            Ok(snapshot) => {
                info!(location = %location.name, "weather snapshot updated");
                if !self.state.lock().complete(ticket, location, snapshot) {
                    info!("discarding stale forecast response");
                }
            }
            Err(e) => self.record_failure(ticket, &e),
        }
    }

    fn record_failure(&self, ticket: RequestTicket, error: &DashboardError) {
        warn!(error = %error, detail = error.detail().unwrap_or_default(), "dashboard request failed");
        if !self.state.lock().fail(ticket, error) {
            info!("discarding stale failure");
        }
    }
}

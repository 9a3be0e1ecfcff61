//! Open-Meteo forecast wire format and its normalization into [`WeatherSnapshot`].

use serde::Deserialize;
use tracing::warn;

use crate::{
    model::{CurrentWeather, DailyForecast, HourlyForecast, SnapshotLocation, WeatherSnapshot},
    units::round_half_up,
};

/// Hourly rows kept from the forecast; the provider sends the whole horizon.
pub const HOURLY_WINDOW: usize = 24;
pub const FORECAST_DAYS: u8 = 7;

pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation,wind_speed_10m,wind_direction_10m,weather_code";
pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation,weather_code,wind_speed_10m";
pub const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum,wind_speed_10m_max";

/// Stands in for a missing weather code; it has no table entry, so it reads as "Unknown".
pub const MISSING_WEATHER_CODE: i32 = -1;

/// Query parameters for one forecast request, coordinates first.
pub fn forecast_query(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", latitude.to_string()),
        ("longitude", longitude.to_string()),
        ("current", CURRENT_FIELDS.to_string()),
        ("hourly", HOURLY_FIELDS.to_string()),
        ("daily", DAILY_FIELDS.to_string()),
        ("temperature_unit", "celsius".to_string()),
        ("wind_speed_unit", "kmh".to_string()),
        ("precipitation_unit", "mm".to_string()),
        ("timezone", "auto".to_string()),
        ("forecast_days", FORECAST_DAYS.to_string()),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub timezone: String,
    pub current: RawCurrent,
    pub hourly: RawHourly,
    pub daily: RawDaily,
}

// Open-Meteo reports gaps in its data as `null`, both in `current` and inside
// the parallel sequences, so every numeric field is optional on the wire.

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    pub time: String,
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<u8>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub wind_direction_10m: Option<u16>,
    #[serde(default)]
    pub weather_code: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Map a decoded response into a snapshot.
///
/// Coordinates are echoed from the request, not read back from the response,
/// since the provider snaps them to its grid. Missing measurements become
/// `0`; missing weather codes become [`MISSING_WEATHER_CODE`].
pub fn normalize(response: ForecastResponse, latitude: f64, longitude: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        current: normalize_current(&response.current),
        hourly: normalize_hourly(response.hourly),
        daily: normalize_daily(response.daily),
        location: SnapshotLocation { latitude, longitude, timezone: response.timezone },
    }
}

fn normalize_current(raw: &RawCurrent) -> CurrentWeather {
    CurrentWeather {
        temperature: round_half_up(raw.temperature_2m.unwrap_or_default()),
        apparent_temperature: raw.apparent_temperature.map(round_half_up),
        weather_code: raw.weather_code.unwrap_or(MISSING_WEATHER_CODE),
        wind_speed: round_half_up(raw.wind_speed_10m.unwrap_or_default()),
        wind_direction: raw.wind_direction_10m.unwrap_or_default(),
        humidity: raw.relative_humidity_2m.unwrap_or_default(),
        precipitation: raw.precipitation.unwrap_or_default(),
        time: raw.time.clone(),
    }
}

fn normalize_hourly(raw: RawHourly) -> HourlyForecast {
    let lengths = [
        raw.time.len(),
        raw.temperature_2m.len(),
        raw.precipitation.len(),
        raw.weather_code.len(),
        raw.wind_speed_10m.len(),
    ];
    let len = aligned_len("hourly", &lengths).min(HOURLY_WINDOW);

    HourlyForecast {
        time: raw.time.into_iter().take(len).collect(),
        temperature: rounded(&raw.temperature_2m, len),
        precipitation: filled(&raw.precipitation, len),
        weather_code: weather_codes(&raw.weather_code, len),
        wind_speed: rounded(&raw.wind_speed_10m, len),
    }
}

fn normalize_daily(raw: RawDaily) -> DailyForecast {
    let lengths = [
        raw.time.len(),
        raw.temperature_2m_max.len(),
        raw.temperature_2m_min.len(),
        raw.weather_code.len(),
        raw.precipitation_sum.len(),
        raw.wind_speed_10m_max.len(),
    ];
    let len = aligned_len("daily", &lengths);

    DailyForecast {
        time: raw.time.into_iter().take(len).collect(),
        temperature_max: rounded(&raw.temperature_2m_max, len),
        temperature_min: rounded(&raw.temperature_2m_min, len),
        weather_code: weather_codes(&raw.weather_code, len),
        precipitation: filled(&raw.precipitation_sum, len),
        wind_speed: rounded(&raw.wind_speed_10m_max, len),
    }
}

fn filled(values: &[Option<f64>], len: usize) -> Vec<f64> {
    values.iter().take(len).map(|v| v.unwrap_or_default()).collect()
}

fn rounded(values: &[Option<f64>], len: usize) -> Vec<i32> {
    values.iter().take(len).map(|v| round_half_up(v.unwrap_or_default())).collect()
}

fn weather_codes(values: &[Option<i32>], len: usize) -> Vec<i32> {
    values.iter().take(len).map(|v| v.unwrap_or(MISSING_WEATHER_CODE)).collect()
}

/// Shortest of the parallel sequences; every sequence gets cut to it.
fn aligned_len(section: &str, lengths: &[usize]) -> usize {
    let min = lengths.iter().copied().min().unwrap_or(0);
    let max = lengths.iter().copied().max().unwrap_or(0);
    if min != max {
        warn!(section, min, max, "forecast sequences differ in length; truncating to shortest");
    }
    min
}

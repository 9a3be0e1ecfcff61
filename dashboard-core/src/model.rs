use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display name given to coordinates that came from device geolocation.
pub const CURRENT_LOCATION_NAME: &str = "Current Location";

/// A resolved geographic point with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self { latitude, longitude, name: name.into() }
    }

    /// San Francisco, used whenever device geolocation cannot produce a position.
    pub fn san_francisco() -> Self {
        Self::new(37.7749, -122.4194, "San Francisco")
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::san_francisco()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// The other unit; what a unit toggle switches to.
    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: c, f."
            )),
        }
    }
}

/// Current conditions, already rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: i32,
    pub apparent_temperature: Option<i32>,
    pub weather_code: i32,
    pub wind_speed: i32,
    pub wind_direction: u16,
    pub humidity: u8,
    pub precipitation: f64,
    pub time: String,
}

/// Hourly forecast as parallel sequences. All sequences share one length, at most 24.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub temperature: Vec<i32>,
    pub precipitation: Vec<f64>,
    pub weather_code: Vec<i32>,
    pub wind_speed: Vec<i32>,
}

impl HourlyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = HourlyPoint<'_>> + '_ {
        self.time
            .iter()
            .zip(&self.temperature)
            .zip(&self.precipitation)
            .zip(&self.weather_code)
            .zip(&self.wind_speed)
            .map(|((((time, &temperature), &precipitation), &weather_code), &wind_speed)| {
                HourlyPoint { time, temperature, precipitation, weather_code, wind_speed }
            })
    }
}

/// One row of [`HourlyForecast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint<'a> {
    pub time: &'a str,
    pub temperature: i32,
    pub precipitation: f64,
    pub weather_code: i32,
    pub wind_speed: i32,
}

/// Daily forecast as parallel sequences of equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub temperature_max: Vec<i32>,
    pub temperature_min: Vec<i32>,
    pub weather_code: Vec<i32>,
    pub precipitation: Vec<f64>,
    pub wind_speed: Vec<i32>,
}

impl DailyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = DailyPoint<'_>> + '_ {
        self.time
            .iter()
            .zip(&self.temperature_max)
            .zip(&self.temperature_min)
            .zip(&self.weather_code)
            .zip(&self.precipitation)
            .zip(&self.wind_speed)
            .map(
                |(((((time, &temperature_max), &temperature_min), &weather_code), &precipitation), &wind_speed)| {
                    DailyPoint {
                        time,
                        temperature_max,
                        temperature_min,
                        weather_code,
                        precipitation,
                        wind_speed,
                    }
                },
            )
    }
}

/// One row of [`DailyForecast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint<'a> {
    pub time: &'a str,
    pub temperature_max: i32,
    pub temperature_min: i32,
    pub weather_code: i32,
    pub precipitation: f64,
    pub wind_speed: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Everything one successful forecast fetch produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub hourly: HourlyForecast,
    pub daily: DailyForecast,
    pub location: SnapshotLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parses_short_and_long_names() {
        assert_eq!("c".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!("F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(" fahrenheit ".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn unknown_unit_error() {
        let err = "kelvin".parse::<TemperatureUnit>().unwrap_err();
        assert!(err.to_string().contains("Unknown temperature unit"));
    }

    #[test]
    fn toggled_switches_units() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
    }

    #[test]
    fn hourly_points_align_sequences() {
        let hourly = HourlyForecast {
            time: vec!["2024-01-15T00:00".into(), "2024-01-15T01:00".into()],
            temperature: vec![3, 2],
            precipitation: vec![0.0, 0.4],
            weather_code: vec![3, 61],
            wind_speed: vec![10, 12],
        };

        let points: Vec<_> = hourly.points().collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].time, "2024-01-15T01:00");
        assert_eq!(points[1].weather_code, 61);
        assert_eq!(points[1].precipitation, 0.4);
    }
}

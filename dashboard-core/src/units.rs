//! Pure conversion and formatting helpers shared by the fetcher and the widgets.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::TemperatureUnit;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Convert a whole-degree temperature between units.
///
/// Conversion rounds to whole degrees, so a C -> F -> C round trip may drift by one.
pub fn convert_temperature(value: i32, from: TemperatureUnit, to: TemperatureUnit) -> i32 {
    let degrees = f64::from(value);
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => {
            round_half_up(degrees * 9.0 / 5.0 + 32.0)
        }
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => {
            round_half_up((degrees - 32.0) * 5.0 / 9.0)
        }
        _ => value,
    }
}

/// Render a Celsius value in the requested display unit, e.g. `68°F`.
pub fn format_temperature(celsius: i32, unit: TemperatureUnit) -> String {
    let value = convert_temperature(celsius, TemperatureUnit::Celsius, unit);
    format!("{value}°{}", unit.symbol())
}

/// Short clock time (`14:00`). Unparseable input is returned unchanged.
pub fn format_time(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => iso.to_string(),
    }
}

/// Short calendar date (`Mon, Jan 15`). Unparseable input is returned unchanged.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%a, %b %-d").to_string(),
        None => iso.to_string(),
    }
}

/// Eight-point compass name for a bearing in degrees.
pub fn compass_direction(degrees: u16) -> &'static str {
    let index = round_half_up(f64::from(degrees) / 45.0).rem_euclid(8) as usize;
    COMPASS_POINTS[index]
}

/// Open-Meteo sends local times without an offset (`2024-01-15T14:00`) and
/// plain dates for daily rows; RFC 3339 is accepted as well.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

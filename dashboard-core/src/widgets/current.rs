use serde::Serialize;

use crate::{
    codes::{describe_weather_code, icon_for_weather_code},
    model::{CurrentWeather, TemperatureUnit},
    units::{compass_direction, format_temperature},
};

use super::{StateCopy, Widget, WidgetIcon, WidgetKind, WidgetLayout, resolve_content};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeatherView {
    pub icon: &'static str,
    pub temperature: String,
    pub feels_like: Option<String>,
    pub description: &'static str,
    pub wind_speed: String,
    pub humidity: String,
    pub precipitation: String,
    pub wind_direction: String,
    pub compass: &'static str,
}

impl CurrentWeatherView {
    fn new(weather: &CurrentWeather, unit: TemperatureUnit) -> Self {
        Self {
            icon: icon_for_weather_code(weather.weather_code),
            temperature: format_temperature(weather.temperature, unit),
            feels_like: weather.apparent_temperature.map(|t| format_temperature(t, unit)),
            description: describe_weather_code(weather.weather_code),
            wind_speed: format!("{} km/h", weather.wind_speed),
            humidity: format!("{}%", weather.humidity),
            precipitation: format!("{} mm", weather.precipitation),
            wind_direction: format!("{}°", weather.wind_direction),
            compass: compass_direction(weather.wind_direction),
        }
    }
}

pub fn current_weather_widget(
    weather: Option<&CurrentWeather>,
    loading: bool,
    error: Option<&str>,
    unit: TemperatureUnit,
) -> Widget<CurrentWeatherView> {
    let copy = StateCopy {
        loading: "Loading weather data...",
        empty: "No weather data available",
        error_action: None,
        empty_action: None,
    };

    Widget {
        kind: WidgetKind::CurrentWeather,
        title: "Current Weather",
        description: "Current weather conditions",
        icon: WidgetIcon::List,
        layout: WidgetLayout::new(3, 1),
        content: resolve_content(weather, loading, error, copy, |w| CurrentWeatherView::new(w, unit)),
    }
}

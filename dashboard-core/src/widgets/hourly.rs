use serde::Serialize;

use crate::{
    model::{HourlyForecast, TemperatureUnit},
    units::{convert_temperature, format_time},
};

use super::{StateCopy, Widget, WidgetIcon, WidgetKind, WidgetLayout, resolve_content};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    pub temperature: ChartSeries,
    pub precipitation: ChartSeries,
    /// First and last timestamp.
    pub x_domain: Option<(String, String)>,
    pub y_domain: (f64, f64),
}

impl HourlyChart {
    fn new(forecast: &HourlyForecast, unit: TemperatureUnit) -> Self {
        let mut temperature = Vec::with_capacity(forecast.len());
        let mut precipitation = Vec::with_capacity(forecast.len());

        for point in forecast.points() {
            let label = format_time(point.time);
            let temp = convert_temperature(point.temperature, TemperatureUnit::Celsius, unit);
            temperature.push(ChartPoint {
                time: point.time.to_string(),
                label: label.clone(),
                value: f64::from(temp),
            });
            precipitation.push(ChartPoint {
                time: point.time.to_string(),
                label,
                value: point.precipitation,
            });
        }

        let x_domain = match (forecast.time.first(), forecast.time.last()) {
            (Some(first), Some(last)) => Some((first.clone(), last.clone())),
            _ => None,
        };

        // Zero stays on the axis; headroom of 5 above the highest value.
        let y_min = temperature.iter().map(|p| p.value).fold(0.0, f64::min);
        let y_max = temperature
            .iter()
            .chain(precipitation.iter())
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let y_max = if y_max.is_finite() { y_max } else { 0.0 };

        Self {
            temperature: ChartSeries {
                title: format!("Temperature (°{})", unit.symbol()),
                points: temperature,
            },
            precipitation: ChartSeries { title: "Precipitation (mm)".to_string(), points: precipitation },
            x_domain,
            y_domain: (y_min, y_max + 5.0),
        }
    }
}

pub fn hourly_forecast_widget(
    forecast: Option<&HourlyForecast>,
    loading: bool,
    error: Option<&str>,
    unit: TemperatureUnit,
) -> Widget<HourlyChart> {
    let copy = StateCopy {
        loading: "Loading forecast data...",
        empty: "No forecast data available",
        error_action: None,
        empty_action: None,
    };

    Widget {
        kind: WidgetKind::HourlyForecast,
        title: "Hourly Forecast",
        description: "24-hour temperature and precipitation forecast",
        icon: WidgetIcon::LineChart,
        layout: WidgetLayout { min_row_span: Some(3), static_min_height: Some(360), ..WidgetLayout::new(4, 2) },
        content: resolve_content(forecast, loading, error, copy, |f| HourlyChart::new(f, unit)),
    }
}

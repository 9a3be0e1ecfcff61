use serde::Serialize;

use crate::{
    codes::{describe_weather_code, icon_for_weather_code},
    model::{DailyForecast, TemperatureUnit},
    units::{format_date, format_temperature},
};

use super::{StateCopy, Widget, WidgetIcon, WidgetKind, WidgetLayout, resolve_content};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCard {
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub icon: &'static str,
    pub description: &'static str,
    pub high: String,
    pub low: String,
    pub precipitation: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCards {
    pub cards: Vec<DailyCard>,
}

impl DailyCards {
    fn new(forecast: &DailyForecast, unit: TemperatureUnit) -> Self {
        let cards = forecast
            .days()
            .enumerate()
            .map(|(index, day)| {
                let is_today = index == 0;
                DailyCard {
                    date: day.time.to_string(),
                    label: if is_today { "Today".to_string() } else { format_date(day.time) },
                    is_today,
                    icon: icon_for_weather_code(day.weather_code),
                    description: describe_weather_code(day.weather_code),
                    high: format_temperature(day.temperature_max, unit),
                    low: format_temperature(day.temperature_min, unit),
                    precipitation: format!("{:.1}mm", day.precipitation),
                    wind_speed: format!("{}km/h", day.wind_speed),
                }
            })
            .collect();

        Self { cards }
    }
}

pub fn daily_forecast_widget(
    forecast: Option<&DailyForecast>,
    loading: bool,
    error: Option<&str>,
    unit: TemperatureUnit,
) -> Widget<DailyCards> {
    let copy = StateCopy {
        loading: "Loading forecast data...",
        empty: "No forecast data available",
        error_action: None,
        empty_action: None,
    };

    Widget {
        kind: WidgetKind::DailyForecast,
        title: "Daily Forecast",
        description: "7-day weather forecast",
        icon: WidgetIcon::Table,
        layout: WidgetLayout { static_min_height: Some(320), ..WidgetLayout::new(3, 2) },
        content: resolve_content(forecast, loading, error, copy, |f| DailyCards::new(f, unit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{DisplayState, WidgetContent};

    fn forecast() -> DailyForecast {
        DailyForecast {
            time: vec!["2024-01-15".into(), "2024-01-16".into()],
            temperature_max: vec![10, 0],
            temperature_min: vec![2, -5],
            weather_code: vec![61, 42],
            precipitation: vec![4.3, 0.0],
            wind_speed: vec![20, 9],
        }
    }

    #[test]
    fn first_card_is_today() {
        let f = forecast();
        let WidgetContent::Ready(daily) = daily_forecast_widget(Some(&f), false, None, TemperatureUnit::Celsius).content
        else {
            panic!("expected cards");
        };

        assert_eq!(daily.cards.len(), 2);
        assert!(daily.cards[0].is_today);
        assert_eq!(daily.cards[0].label, "Today");
        assert_eq!(daily.cards[0].description, "Slight rain");
        assert_eq!(daily.cards[0].high, "10°C");
        assert_eq!(daily.cards[0].precipitation, "4.3mm");
        assert_eq!(daily.cards[0].wind_speed, "20km/h");

        assert!(!daily.cards[1].is_today);
        assert_eq!(daily.cards[1].label, "Tue, Jan 16");
        assert_eq!(daily.cards[1].description, "Unknown");
        assert_eq!(daily.cards[1].icon, "❓");
    }

    #[test]
    fn temperatures_use_display_unit() {
        let f = forecast();
        let WidgetContent::Ready(daily) = daily_forecast_widget(Some(&f), false, None, TemperatureUnit::Fahrenheit).content
        else {
            panic!("expected cards");
        };

        assert_eq!(daily.cards[1].high, "32°F");
        assert_eq!(daily.cards[1].low, "23°F");
    }

    #[test]
    fn error_beats_loading_and_data() {
        let f = forecast();
        let widget = daily_forecast_widget(Some(&f), true, Some("Failed to load weather data"), TemperatureUnit::Celsius);
        assert_eq!(widget.state(), DisplayState::Error);
    }

    #[test]
    fn empty_state() {
        let widget = daily_forecast_widget(None, false, None, TemperatureUnit::Celsius);
        assert_eq!(
            widget.content,
            WidgetContent::Empty { message: "No forecast data available", action: None }
        );
        assert_eq!(widget.layout.static_min_height, Some(320));
    }
}

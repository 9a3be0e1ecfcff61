use serde::Serialize;

use crate::{
    model::{TemperatureUnit, WeatherSnapshot},
    units::{format_date, format_time},
};

use super::{Action, Intent, StateCopy, Widget, WidgetIcon, WidgetKind, WidgetLayout, resolve_content};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPanel {
    pub name: String,
    pub coordinates: String,
    pub timezone: String,
    pub last_updated: String,
    pub unit: TemperatureUnit,
    pub actions: Vec<Action>,
}

/// Location panel. `refresh` is bound to the retry, get-location and refresh buttons.
pub fn location_widget(
    snapshot: Option<&WeatherSnapshot>,
    loading: bool,
    error: Option<&str>,
    location_name: &str,
    unit: TemperatureUnit,
    refresh: Intent,
) -> Widget<LocationPanel> {
    let copy = StateCopy {
        loading: "Loading location data...",
        empty: "No location data available",
        error_action: Some(Action { label: "Retry", intent: refresh.clone() }),
        empty_action: Some(Action { label: "Get Location", intent: refresh.clone() }),
    };

    let content = resolve_content(snapshot, loading, error, copy, |snapshot| {
        let time = &snapshot.current.time;
        LocationPanel {
            name: location_name.to_string(),
            coordinates: format!(
                "{:.4}°, {:.4}°",
                snapshot.location.latitude, snapshot.location.longitude
            ),
            timezone: snapshot.location.timezone.clone(),
            last_updated: format!("{} {}", format_date(time), format_time(time)),
            unit,
            actions: vec![
                Action { label: "Refresh Location", intent: refresh },
                Action { label: "Toggle Unit", intent: Intent::SetUnit(unit.toggled()) },
            ],
        }
    });

    Widget {
        kind: WidgetKind::Location,
        title: "Location & Info",
        description: "Current location and weather information",
        icon: WidgetIcon::Settings,
        layout: WidgetLayout::new(3, 1),
        content,
    }
}

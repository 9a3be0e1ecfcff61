//! Plain-text rendering of widget descriptors.

use dashboard_core::widgets::{
    CurrentWeatherView, DailyCards, DashboardWidget, HourlyChart, LocationPanel, Widget,
    WidgetContent,
};

pub fn dashboard(widgets: &[DashboardWidget]) -> String {
    widgets.iter().map(widget).collect::<Vec<_>>().join("\n")
}

fn widget(widget: &DashboardWidget) -> String {
    match widget {
        DashboardWidget::Current(w) => panel(w, current),
        DashboardWidget::Location(w) => panel(w, location),
        DashboardWidget::Hourly(w) => panel(w, hourly),
        DashboardWidget::Daily(w) => panel(w, daily),
    }
}

fn panel<T>(widget: &Widget<T>, body: impl Fn(&T) -> Vec<String>) -> String {
    let header = widget.header();
    let mut lines = vec![format!("== {} ==", header.title), format!("   {}", header.description)];

    match widget.content() {
        WidgetContent::Loading { message } => lines.push(format!("   {message}")),
        WidgetContent::Error { message, action } => {
            lines.push(format!("   error: {message}"));
            lines.extend(action.iter().map(|a| format!("   [{}]", a.label)));
        }
        WidgetContent::Empty { message, action } => {
            lines.push(format!("   {message}"));
            lines.extend(action.iter().map(|a| format!("   [{}]", a.label)));
        }
        WidgetContent::Ready(view) => lines.extend(body(view)),
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn current(view: &CurrentWeatherView) -> Vec<String> {
    let mut lines = vec![format!("   {} {}  {}", view.icon, view.temperature, view.description)];
    if let Some(feels_like) = &view.feels_like {
        lines.push(format!("   Feels like {feels_like}"));
    }
    lines.push(format!("   Wind: {} {} ({})", view.wind_speed, view.compass, view.wind_direction));
    lines.push(format!("   Humidity: {}   Precipitation: {}", view.humidity, view.precipitation));
    lines
}

fn location(panel: &LocationPanel) -> Vec<String> {
    vec![
        format!("   Location:     {}", panel.name),
        format!("   Coordinates:  {}", panel.coordinates),
        format!("   Timezone:     {}", panel.timezone),
        format!("   Last updated: {}", panel.last_updated),
    ]
}

fn hourly(chart: &HourlyChart) -> Vec<String> {
    let header = format!(
        "   {:>6}  {:>16}  {:>18}",
        "Time", chart.temperature.title, chart.precipitation.title
    );
    let rows = chart.temperature.points.iter().zip(&chart.precipitation.points).map(|(temp, precip)| {
        format!("   {:>6}  {:>16}  {:>18.1}", temp.label, temp.value, precip.value)
    });
    std::iter::once(header).chain(rows).collect()
}

fn daily(daily: &DailyCards) -> Vec<String> {
    daily
        .cards
        .iter()
        .map(|card| {
            format!(
                "   {:<12} {} {:<24} {:>6} / {:<6} {:>7} {:>8}",
                card.label,
                card.icon,
                card.description,
                card.high,
                card.low,
                card.precipitation,
                card.wind_speed
            )
        })
        .collect()
}

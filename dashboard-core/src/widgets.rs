//! Widget adapters: pure functions from fetched data plus UI state to
//! display-ready descriptors. Rendering is left to the front end.
//!
//! Every widget content resolves to exactly one of four states, chosen with
//! the same precedence everywhere: error, then loading, then empty, then
//! populated.

use serde::Serialize;

use crate::model::TemperatureUnit;

pub mod current;
pub mod daily;
pub mod hourly;
pub mod location;

pub use current::{CurrentWeatherView, current_weather_widget};
pub use daily::{DailyCard, DailyCards, daily_forecast_widget};
pub use hourly::{ChartPoint, ChartSeries, HourlyChart, hourly_forecast_widget};
pub use location::{LocationPanel, location_widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetKind {
    CurrentWeather,
    Location,
    HourlyForecast,
    DailyForecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetIcon {
    List,
    Settings,
    LineChart,
    Table,
}

impl WidgetIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetIcon::List => "list",
            WidgetIcon::Settings => "settings",
            WidgetIcon::LineChart => "lineChart",
            WidgetIcon::Table => "table",
        }
    }
}

/// Grid sizing hints for the dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetLayout {
    pub row_span: u8,
    pub column_span: u8,
    pub min_row_span: Option<u8>,
    pub static_min_height: Option<u32>,
}

impl WidgetLayout {
    const fn new(row_span: u8, column_span: u8) -> Self {
        Self { row_span, column_span, min_row_span: None, static_min_height: None }
    }
}

/// A user action the front end feeds back into the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Intent {
    RefreshLocation,
    SetUnit(TemperatureUnit),
}

/// A labeled button bound to an [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: &'static str,
    pub intent: Intent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayState {
    Loading,
    Error,
    Empty,
    Populated,
}

pub fn select_state(error: Option<&str>, loading: bool, has_data: bool) -> DisplayState {
    if error.is_some() {
        DisplayState::Error
    } else if loading {
        DisplayState::Loading
    } else if !has_data {
        DisplayState::Empty
    } else {
        DisplayState::Populated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WidgetContent<T> {
    Loading { message: &'static str },
    Error { message: String, action: Option<Action> },
    Empty { message: &'static str, action: Option<Action> },
    Ready(T),
}

impl<T> WidgetContent<T> {
    pub fn state(&self) -> DisplayState {
        match self {
            WidgetContent::Loading { .. } => DisplayState::Loading,
            WidgetContent::Error { .. } => DisplayState::Error,
            WidgetContent::Empty { .. } => DisplayState::Empty,
            WidgetContent::Ready(_) => DisplayState::Populated,
        }
    }
}

/// Messages and actions a widget shows outside the populated state.
pub(crate) struct StateCopy {
    pub loading: &'static str,
    pub empty: &'static str,
    pub error_action: Option<Action>,
    pub empty_action: Option<Action>,
}

/// Pick the content state and build the populated view only when it is shown.
pub(crate) fn resolve_content<D, T>(
    data: Option<D>,
    loading: bool,
    error: Option<&str>,
    copy: StateCopy,
    populate: impl FnOnce(D) -> T,
) -> WidgetContent<T> {
    match (select_state(error, loading, data.is_some()), data) {
        (DisplayState::Populated, Some(data)) => WidgetContent::Ready(populate(data)),
        (DisplayState::Error, _) => WidgetContent::Error {
            message: error.unwrap_or_default().to_string(),
            action: copy.error_action,
        },
        (DisplayState::Loading, _) => WidgetContent::Loading { message: copy.loading },
        _ => WidgetContent::Empty { message: copy.empty, action: copy.empty_action },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetHeader {
    pub title: &'static str,
    pub description: &'static str,
}

/// Display-ready bundle for one dashboard panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget<T> {
    pub kind: WidgetKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: WidgetIcon,
    pub layout: WidgetLayout,
    pub content: WidgetContent<T>,
}

impl<T> Widget<T> {
    pub fn header(&self) -> WidgetHeader {
        WidgetHeader { title: self.title, description: self.description }
    }

    pub fn content(&self) -> &WidgetContent<T> {
        &self.content
    }

    pub fn state(&self) -> DisplayState {
        self.content.state()
    }
}

/// Any of the four dashboard widgets, in grid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DashboardWidget {
    Current(Widget<CurrentWeatherView>),
    Location(Widget<LocationPanel>),
    Hourly(Widget<HourlyChart>),
    Daily(Widget<DailyCards>),
}

impl DashboardWidget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            DashboardWidget::Current(w) => w.kind,
            DashboardWidget::Location(w) => w.kind,
            DashboardWidget::Hourly(w) => w.kind,
            DashboardWidget::Daily(w) => w.kind,
        }
    }

    pub fn header(&self) -> WidgetHeader {
        match self {
            DashboardWidget::Current(w) => w.header(),
            DashboardWidget::Location(w) => w.header(),
            DashboardWidget::Hourly(w) => w.header(),
            DashboardWidget::Daily(w) => w.header(),
        }
    }

    pub fn state(&self) -> DisplayState {
        match self {
            DashboardWidget::Current(w) => w.state(),
            DashboardWidget::Location(w) => w.state(),
            DashboardWidget::Hourly(w) => w.state(),
            DashboardWidget::Daily(w) => w.state(),
        }
    }
}

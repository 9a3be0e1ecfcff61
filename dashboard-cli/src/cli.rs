use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_core::{
    Config, Coordinate, Dashboard, DashboardError, Geocoder, OpenMeteoClient, TemperatureUnit,
    search_location_by_name,
};
use inquire::{Confirm, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    C,
    F,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::C => TemperatureUnit::Celsius,
            UnitArg::F => TemperatureUnit::Fahrenheit,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for the current (or fallback) location.
    Show {
        /// Display unit; defaults to the configured one.
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,

        /// Skip IP geolocation and use the configured fallback location.
        #[arg(long)]
        no_geolocation: bool,
    },

    /// Search a place by name and show its dashboard.
    Search {
        /// Place name, e.g. "Paris" or "Springfield, Illinois".
        query: String,

        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },

    /// Interactively set the display unit, fallback location and geolocation.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Show { unit, no_geolocation } => {
                if no_geolocation {
                    config.geolocation.enabled = false;
                }
                let dashboard = build_dashboard(&config, unit)?;
                dashboard.load_current_location().await;
                print_dashboard(&dashboard)
            }
            Command::Search { query, unit } => {
                if query.trim().is_empty() {
                    println!("Nothing to search for.");
                    return Ok(());
                }
                let dashboard = build_dashboard(&config, unit)?;
                dashboard.search(&query).await;
                print_dashboard(&dashboard)
            }
            Command::Configure => configure(&mut config).await,
        }
    }
}

fn build_dashboard(config: &Config, unit: Option<UnitArg>) -> anyhow::Result<Dashboard> {
    let dashboard = Dashboard::from_config(config)?;
    if let Some(unit) = unit {
        dashboard.set_unit(unit.into());
    }
    Ok(dashboard)
}

/// Print every widget; a surfaced error also makes the exit status non-zero.
fn print_dashboard(dashboard: &Dashboard) -> anyhow::Result<()> {
    let state = dashboard.state();
    println!("{}", render::dashboard(&state.widgets()));

    match state.error {
        Some(error) => Err(anyhow::anyhow!(error)),
        None => Ok(()),
    }
}

/// Look up a new fallback location. A miss is not fatal to `configure`,
/// the remaining answers still get saved.
async fn find_fallback(geocoder: &dyn Geocoder, place: &str) -> anyhow::Result<Option<Coordinate>> {
    match search_location_by_name(geocoder, place).await {
        Ok(found) => Ok(found),
        Err(DashboardError::LocationNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn configure(config: &mut Config) -> anyhow::Result<()> {
    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    let unit = Select::new("Display unit:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read display unit")?;
    config.set_unit(unit);

    let place = Text::new("Fallback location (leave blank to keep current):")
        .with_help_message(&format!("current: {}", config.fallback_location.name))
        .prompt()
        .context("Failed to read fallback location")?;

    if !place.trim().is_empty() {
        let client = OpenMeteoClient::new(&config.endpoints)?;
        match find_fallback(&client, &place).await? {
            Some(found) => {
                println!(
                    "Fallback location set to {} ({:.4}, {:.4})",
                    found.name, found.latitude, found.longitude
                );
                config.set_fallback_location(found);
            }
            None => println!(
                "No place named \"{}\"; keeping fallback location {}",
                place.trim(),
                config.fallback_location.name
            ),
        }
    }

    config.geolocation.enabled = Confirm::new("Use IP geolocation to find your position?")
        .with_default(config.geolocation.enabled)
        .prompt()
        .context("Failed to read geolocation choice")?;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

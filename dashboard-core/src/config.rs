use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::model::{Coordinate, TemperatureUnit};

/// HTTP endpoints used by the Open-Meteo client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

const fn default_http_timeout() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            timeout_secs: default_http_timeout(),
        }
    }
}

/// Device geolocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Upper bound on a geolocation attempt before falling back.
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_secs: u64,

    /// IP geolocation lookup URL.
    #[serde(default = "default_geolocation_url")]
    pub url: String,
}

const fn default_enabled() -> bool {
    true
}

const fn default_geolocation_timeout() -> u64 {
    10
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json".to_string()
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_secs: default_geolocation_timeout(),
            url: default_geolocation_url(),
        }
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// unit = "fahrenheit"
///
/// [fallback_location]
/// name = "New York"
/// latitude = 40.7128
/// longitude = -74.006
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub unit: TemperatureUnit,

    /// Used whenever geolocation is disabled or fails.
    #[serde(default)]
    pub fallback_location: Coordinate,

    #[serde(default)]
    pub geolocation: GeolocationConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn set_fallback_location(&mut self, location: Coordinate) {
        self.fallback_location = location;
    }
}

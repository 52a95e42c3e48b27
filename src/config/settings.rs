use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{Coordinates, PrayerType, DEFAULT_CENTER};

fn default_region_name() -> String {
    "FCT Abuja".to_string()
}
fn default_location_label() -> String {
    "central Abuja".to_string()
}
fn default_center_lat() -> f64 {
    DEFAULT_CENTER.lat
}
fn default_center_lng() -> f64 {
    DEFAULT_CENTER.lng
}
fn default_prayer() -> String {
    PrayerType::default().as_str().to_string()
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_engine() -> String {
    "osrm".to_string()
}
fn default_osrm_url() -> String {
    "https://router.project-osrm.org".to_string()
}
fn default_profile() -> String {
    "driving".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_average_speed() -> f64 {
    30.0
}
fn default_detour_factor() -> f64 {
    1.3
}
fn default_provider() -> String {
    "ip".to_string()
}
fn default_ip_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_region_name")]
    pub region_name: String,
    /// How the default location is described to the user.
    #[serde(default = "default_location_label")]
    pub default_location_label: String,
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_prayer")]
    pub default_prayer: String,
    /// Days to add/subtract from the Hijri date shown in the header.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl MapConfig {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.center_lat, self.center_lng)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            region_name: default_region_name(),
            default_location_label: default_location_label(),
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            default_prayer: default_prayer(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// "osrm" or "straight-line"
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_osrm_url")]
    pub osrm_url: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,
    #[serde(default = "default_detour_factor")]
    pub detour_factor: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            osrm_url: default_osrm_url(),
            profile: default_profile(),
            timeout_secs: default_timeout_secs(),
            average_speed_kmh: default_average_speed(),
            detour_factor: default_detour_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// "ip", "fixed" or "none"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
    /// Used by the "fixed" provider.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            ip_lookup_url: default_ip_lookup_url(),
            latitude: None,
            longitude: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "musalla")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("musalla.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

//! Dashboard configuration.
//!
//! Configuration is read from a TOML file (optional) and then overridden from
//! environment variables. The density core itself has no defaults; the values
//! below are the operational defaults of the Singapore dashboard.
//!
//! ```toml
//! highlight_threshold = 25
//!
//! [grid]
//! min_lat = 1.2
//! min_lon = 103.6
//! cell_size = 0.01
//!
//! [[rules]]
//! lower_bound = 36
//! tier = "high"
//!
//! [[rules]]
//! lower_bound = 21
//! tier = "medium"
//!
//! [source]
//! type = "http"
//! url = "https://api.data.gov.sg/v1/transport/taxi-availability"
//!
//! [cache]
//! ttl_secs = 90
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::DensityError;
use crate::models::{Coordinate, GridConfig, ThresholdRule, Tier};
use crate::services::classification::validate_rules;
use crate::services::overlay::{OverlayOptions, OverlayStyle, TierPalette, DEFAULT_MAP_CENTER};
use crate::source::{SourceType, DEFAULT_TAXI_API_URL};

/// Name of the config file searched for by [`DensityConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "density.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {key}: {message}")]
    Env { key: String, message: String },

    #[error("Missing setting: {0}")]
    Missing(String),

    #[error(transparent)]
    Invalid(#[from] DensityError),
}

/// Named threshold presets matching the legacy dashboard variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityPreset {
    /// High above 35 taxis, medium above 20, markers above 25
    Default,
    /// High above 20 taxis, medium above 10, markers above 20
    Classic,
}

impl DensityPreset {
    pub fn rules(&self) -> Vec<ThresholdRule> {
        match self {
            Self::Default => vec![
                ThresholdRule::new(36, Tier::High),
                ThresholdRule::new(21, Tier::Medium),
            ],
            Self::Classic => vec![
                ThresholdRule::new(21, Tier::High),
                ThresholdRule::new(11, Tier::Medium),
            ],
        }
    }

    pub fn highlight_threshold(&self) -> u64 {
        match self {
            Self::Default => 25,
            Self::Classic => 20,
        }
    }
}

impl FromStr for DensityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "classic" => Ok(Self::Classic),
            _ => Err(format!("Unknown density preset: {}", s)),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityConfig {
    #[serde(default = "default_grid")]
    pub grid: GridConfig,
    #[serde(default = "default_rules")]
    pub rules: Vec<ThresholdRule>,
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: u64,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub map: MapSettings,
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: SourceType,
    #[serde(default = "default_source_url")]
    pub url: String,
    /// GeoJSON file for the `file` source
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_map_center")]
    pub center: Coordinate,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default)]
    pub palette: TierPalette,
}

fn default_grid() -> GridConfig {
    GridConfig {
        min_lat: 1.2,
        min_lon: 103.6,
        cell_size: 0.01,
    }
}

fn default_rules() -> Vec<ThresholdRule> {
    DensityPreset::Default.rules()
}

fn default_highlight_threshold() -> u64 {
    DensityPreset::Default.highlight_threshold()
}

fn default_source_type() -> SourceType {
    SourceType::Http
}

fn default_source_url() -> String {
    DEFAULT_TAXI_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_ttl_secs() -> u64 {
    90
}

fn default_map_center() -> Coordinate {
    DEFAULT_MAP_CENTER
}

impl SourceSettings {
    /// Upstream request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            url: default_source_url(),
            path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: default_map_center(),
            style: OverlayStyle::default(),
            palette: TierPalette::default(),
        }
    }
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            grid: default_grid(),
            rules: default_rules(),
            highlight_threshold: default_highlight_threshold(),
            source: SourceSettings::default(),
            cache: CacheSettings::default(),
            map: MapSettings::default(),
        }
    }
}

impl DensityConfig {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from the first `density.toml` found in the current directory,
    /// `backend/`, or the parent directory. Returns `Ok(None)` if none exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the effective configuration.
    ///
    /// `DENSITY_CONFIG` names an explicit file; otherwise the default
    /// locations are searched, falling back to built-in defaults. Environment
    /// overrides are applied last and the result is validated.
    ///
    /// # Environment Variables
    /// - `DENSITY_CONFIG`: path to a TOML config file
    /// - `DENSITY_PRESET`: `default` | `classic` threshold preset
    /// - `TAXI_SOURCE`: `http` | `file` | `static`
    /// - `TAXI_API_URL`: upstream URL for the `http` source
    /// - `TAXI_FILE_PATH`: GeoJSON path for the `file` source
    /// - `GRID_MIN_LAT`, `GRID_MIN_LON`, `GRID_CELL_SIZE`: grid origin and cell size
    /// - `HIGHLIGHT_THRESHOLD`: marker cutoff
    /// - `CACHE_TTL_SECS`: snapshot cache lifetime
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("DENSITY_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables that are set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(preset) = parse_env::<DensityPreset>("DENSITY_PRESET")? {
            self.rules = preset.rules();
            self.highlight_threshold = preset.highlight_threshold();
        }
        if let Some(source_type) = parse_env::<SourceType>("TAXI_SOURCE")? {
            self.source.source_type = source_type;
        }
        if let Some(url) = parse_env::<String>("TAXI_API_URL")? {
            self.source.url = url;
        }
        if let Some(path) = parse_env::<PathBuf>("TAXI_FILE_PATH")? {
            self.source.path = Some(path);
        }
        if let Some(min_lat) = parse_env::<f64>("GRID_MIN_LAT")? {
            self.grid.min_lat = min_lat;
        }
        if let Some(min_lon) = parse_env::<f64>("GRID_MIN_LON")? {
            self.grid.min_lon = min_lon;
        }
        if let Some(cell_size) = parse_env::<f64>("GRID_CELL_SIZE")? {
            self.grid.cell_size = cell_size;
        }
        if let Some(threshold) = parse_env::<u64>("HIGHLIGHT_THRESHOLD")? {
            self.highlight_threshold = threshold;
        }
        if let Some(ttl) = parse_env::<u64>("CACHE_TTL_SECS")? {
            self.cache.ttl_secs = ttl;
        }
        Ok(())
    }

    /// Check the grid, the rules and the source settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        validate_rules(&self.rules)?;
        self.map.center.validate()?;
        if self.source.source_type == SourceType::File && self.source.path.is_none() {
            return Err(ConfigError::Missing(
                "source.path is required for the file source".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Overlay options for `style`, or the configured default style.
    pub fn overlay_options(&self, style: Option<OverlayStyle>) -> OverlayOptions {
        OverlayOptions {
            style: style.unwrap_or(self.map.style),
            palette: self.map.palette.clone(),
            center: self.map.center,
        }
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Env {
                    key: key.to_string(),
                    message: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

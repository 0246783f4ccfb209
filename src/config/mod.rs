//! Configuration system for lumenr with validation.
//!
//! This module provides configuration management for the lumenr application,
//! handling the TOML-based configuration file, validation, and default value
//! generation.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! latitude = 40.7128       # Geographic latitude (-90 to 90)
//! longitude = -74.0060     # Geographic longitude (-180 to 180)
//!
//! #[Curve]
//! curve = "hann"           # Daylight curve model (see `lumenr curves`)
//! min_temp = 2000          # Color temperature floor (1000-20000) Kelvin
//! max_temp = 6500          # Color temperature ceiling (1000-20000) Kelvin
//! min_brightness = 5.0     # Brightness floor (0-100%)
//! max_brightness = 100.0   # Brightness ceiling (0-100%)
//!
//! #[Schedule]
//! interval_minutes = 15    # Evaluation grid spacing (1-240)
//! buffer_minutes = 60      # Padding around the first/last sun event (0-360)
//! include_sun_events = true
//!
//! #[Calibration]
//! max_lux = "2700:8000,5600:10000,6500:9000"  # CCT:lux breakpoints, or a bare cap
//! ```
//!
//! ## Validation and Error Handling
//!
//! Range validation covers temperatures (1000-20000 K), brightness (0-100%),
//! coordinates, and schedule grid limits. Invalid configurations produce
//! helpful error messages with suggestions for fixes. A missing max_lux entry
//! is fine; a malformed one is only a warning, since calibration is optional.

pub mod validation;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::constants::*;
use crate::curve::CurveType;
use crate::engine::maxlux::MaxLuxMap;

pub use validation::validate_config;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Geographic latitude in degrees (-90 to +90)
    pub latitude: Option<f64>,
    /// Geographic longitude in degrees (-180 to +180)
    pub longitude: Option<f64>,
    /// Default daylight curve model
    pub curve: Option<String>,
    /// Color temperature floor in Kelvin
    pub min_temp: Option<u32>,
    /// Color temperature ceiling in Kelvin
    pub max_temp: Option<u32>,
    /// Brightness floor in percent
    pub min_brightness: Option<f64>,
    /// Brightness ceiling in percent
    pub max_brightness: Option<f64>,
    /// Schedule grid spacing in minutes
    pub interval_minutes: Option<u32>,
    /// Window padding around the first/last sun event in minutes
    pub buffer_minutes: Option<u32>,
    /// Merge named sun events into the schedule grid
    pub include_sun_events: Option<bool>,
    /// Max-lux calibration spec: breakpoint grammar or a bare cap
    pub max_lux: Option<toml::Value>,
}

impl Config {
    /// Load configuration using automatic path detection.
    ///
    /// Creates a default configuration file if none exists.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        if !path.exists() {
            create_default_config(&path)?;
        }
        Self::load_from_path(&path)
    }

    /// Load and validate configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// The configured curve, falling back to the default model.
    pub fn curve(&self) -> Result<CurveType> {
        let token = self.curve.as_deref().unwrap_or(DEFAULT_CURVE);
        token.parse::<CurveType>().map_err(Into::into)
    }

    /// The configured bounds with defaults applied.
    pub fn bounds(&self) -> crate::engine::CctBounds {
        crate::engine::CctBounds::new(
            self.min_temp.unwrap_or(DEFAULT_MIN_TEMP),
            self.max_temp.unwrap_or(DEFAULT_MAX_TEMP),
            self.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS),
            self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS),
        )
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes.unwrap_or(DEFAULT_INTERVAL_MINUTES)
    }

    pub fn buffer_minutes(&self) -> u32 {
        self.buffer_minutes.unwrap_or(DEFAULT_BUFFER_MINUTES)
    }

    pub fn include_sun_events(&self) -> bool {
        self.include_sun_events
            .unwrap_or(DEFAULT_INCLUDE_SUN_EVENTS)
    }

    /// The calibration table, if one is configured and parseable.
    ///
    /// A malformed spec is reported as a warning rather than an error:
    /// calibration only gates the lux-inversion extra, not the core output.
    pub fn max_lux_map(&self) -> Option<MaxLuxMap> {
        let value = self.max_lux.as_ref()?;
        let parsed = match value {
            toml::Value::String(spec) => MaxLuxMap::parse_spec(spec),
            toml::Value::Integer(cap) if *cap > 0 => Some(MaxLuxMap::flat(*cap as f64)),
            toml::Value::Float(cap) if *cap > 0.0 => Some(MaxLuxMap::flat(*cap)),
            _ => None,
        };
        if parsed.is_none() {
            log_warning!("Ignoring malformed max_lux calibration: {value}");
        }
        parsed
    }
}

/// Resolve the configuration file path, honoring a custom directory override.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(Some(custom)) = CONFIG_DIR.get() {
        return Ok(custom.join("lumenr.toml"));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("lumenr").join("lumenr.toml"))
}

/// Write a default configuration file with documentation comments.
fn create_default_config(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let contents = format!(
        r#"#[Location]
# Set your coordinates, or pass --lat/--lon on the command line
# latitude = 40.7128
# longitude = -74.0060

#[Curve]
curve = "{DEFAULT_CURVE}"        # See `lumenr curves` for the full registry
min_temp = {DEFAULT_MIN_TEMP}        # Color temperature floor (1000-20000) Kelvin
max_temp = {DEFAULT_MAX_TEMP}        # Color temperature ceiling (1000-20000) Kelvin
min_brightness = {DEFAULT_MIN_BRIGHTNESS}   # Brightness floor (0-100%)
max_brightness = {DEFAULT_MAX_BRIGHTNESS} # Brightness ceiling (0-100%)

#[Schedule]
interval_minutes = {DEFAULT_INTERVAL_MINUTES}
buffer_minutes = {DEFAULT_BUFFER_MINUTES}
include_sun_events = {DEFAULT_INCLUDE_SUN_EVENTS}

#[Calibration]
# Maximum achievable lux per CCT for your rig, or a single flat cap
# max_lux = "2700:8000,5600:10000,6500:9000"
"#
    );

    fs::write(path, contents)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    log_decorated!("Created default configuration at {}", path.display());
    Ok(())
}

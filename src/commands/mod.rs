//! CLI subcommand implementations.
//!
//! Each submodule implements one subcommand. Dispatch and the shared
//! resolution of evaluation inputs (coordinates, curve, weather) from config
//! plus CLI overrides live here.

pub mod current;
pub mod curves;
pub mod schedule;

use anyhow::{Context, Result};

use crate::args::{CliAction, EvalOverrides};
use crate::config::Config;
use crate::curve::CurveType;
use crate::engine::weather::{Precipitation, WeatherState};

/// Execute a parsed CLI action.
pub fn dispatch(action: CliAction) -> Result<()> {
    match action {
        CliAction::Current {
            debug_enabled,
            config_dir,
            overrides,
        } => {
            crate::config::set_config_dir(config_dir)?;
            current::handle_current(debug_enabled, &overrides)
        }
        CliAction::Schedule {
            debug_enabled,
            config_dir,
            overrides,
            date,
            curves,
            json,
        } => {
            crate::config::set_config_dir(config_dir)?;
            schedule::handle_schedule(debug_enabled, &overrides, date, curves, json)
        }
        CliAction::Curves => {
            curves::handle_curves();
            Ok(())
        }
        CliAction::ShowHelp => {
            crate::args::display_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            crate::args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            crate::args::display_help();
            std::process::exit(1);
        }
    }
}

/// Coordinates resolved from config or CLI, with their provenance label.
#[derive(Debug)]
pub(crate) struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub source: &'static str,
}

/// Resolve coordinates, preferring CLI overrides over the config file.
pub(crate) fn resolve_location(config: &Config, overrides: &EvalOverrides) -> Result<Location> {
    let cli_lat = overrides
        .latitude
        .as_deref()
        .map(|v| v.parse::<f64>().with_context(|| format!("Invalid --lat '{v}'")))
        .transpose()?;
    let cli_lon = overrides
        .longitude
        .as_deref()
        .map(|v| v.parse::<f64>().with_context(|| format!("Invalid --lon '{v}'")))
        .transpose()?;

    let (latitude, longitude, source) = match (cli_lat, cli_lon) {
        (Some(lat), Some(lon)) => (lat, lon, "cli"),
        (None, None) => match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => (lat, lon, "config"),
            _ => anyhow::bail!(
                "No coordinates configured. Add latitude/longitude to the config \
                 file or pass --lat and --lon"
            ),
        },
        _ => anyhow::bail!("--lat and --lon must be given together"),
    };

    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {latitude})");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("longitude must be between -180 and 180 degrees (got {longitude})");
    }

    Ok(Location {
        latitude,
        longitude,
        source,
    })
}

/// Resolve the curve model, preferring the CLI override.
pub(crate) fn resolve_curve(config: &Config, overrides: &EvalOverrides) -> Result<CurveType> {
    match overrides.curve.as_deref() {
        Some(token) => token.parse::<CurveType>().map_err(Into::into),
        None => config.curve(),
    }
}

/// Build the weather state when any weather flag was supplied.
pub(crate) fn resolve_weather(overrides: &EvalOverrides) -> Result<Option<WeatherState>> {
    if overrides.cloud_cover.is_none() && overrides.precipitation.is_none() {
        return Ok(None);
    }

    let cloud_cover = overrides
        .cloud_cover
        .as_deref()
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("Invalid --cloud '{v}' (expected 0-1)"))
        })
        .transpose()?
        .unwrap_or(0.0);

    let precipitation = overrides
        .precipitation
        .as_deref()
        .map(str::parse::<Precipitation>)
        .transpose()?
        .unwrap_or_default();

    Ok(Some(WeatherState {
        cloud_cover,
        precipitation,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_coordinates_win_over_config() {
        let config = Config {
            latitude: Some(10.0),
            longitude: Some(20.0),
            ..Default::default()
        };
        let overrides = EvalOverrides {
            latitude: Some("51.5".into()),
            longitude: Some("-0.13".into()),
            ..Default::default()
        };
        let location = resolve_location(&config, &overrides).unwrap();
        assert_eq!(location.latitude, 51.5);
        assert_eq!(location.source, "cli");
    }

    #[test]
    fn missing_coordinates_are_an_error() {
        let err = resolve_location(&Config::default(), &EvalOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("No coordinates"));
    }

    #[test]
    fn half_overridden_coordinates_are_rejected() {
        let overrides = EvalOverrides {
            latitude: Some("51.5".into()),
            ..Default::default()
        };
        assert!(resolve_location(&Config::default(), &overrides).is_err());
    }

    #[test]
    fn weather_is_absent_without_flags() {
        assert!(resolve_weather(&EvalOverrides::default()).unwrap().is_none());
    }

    #[test]
    fn precip_alone_implies_clear_cloud_cover() {
        let overrides = EvalOverrides {
            precipitation: Some("rain".into()),
            ..Default::default()
        };
        let weather = resolve_weather(&overrides).unwrap().unwrap();
        assert_eq!(weather.cloud_cover, 0.0);
        assert_eq!(weather.precipitation, Precipitation::Rain);
    }
}

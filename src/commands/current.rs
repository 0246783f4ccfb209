//! Implementation of the `current` subcommand: evaluate the present instant.

use anyhow::{Context, Result};

use crate::args::EvalOverrides;
use crate::config::Config;
use crate::engine::compute_cct;
use crate::geo::solar::{sun_times, timezone_for_coordinates};

use super::{resolve_curve, resolve_location, resolve_weather};

/// Compute and display the lighting target for right now.
pub fn handle_current(debug_enabled: bool, overrides: &EvalOverrides) -> Result<()> {
    log_version!();

    let config = Config::load()?;
    let location = resolve_location(&config, overrides)?;
    let curve = resolve_curve(&config, overrides)?;
    let weather = resolve_weather(overrides)?;
    let bounds = config.bounds();

    let tz = timezone_for_coordinates(location.latitude, location.longitude);
    let now = crate::time_source::now().with_timezone(&tz);

    log_block_start!("Evaluating lighting target");
    log_indented!(
        "Location: {:.4}, {:.4} ({}, {})",
        location.latitude,
        location.longitude,
        tz,
        location.source
    );
    log_indented!("Curve: {}", curve);
    if let Some(state) = &weather {
        log_indented!(
            "Weather: {:.0}% cloud cover, {:?}",
            state.cloud_cover.clamp(0.0, 1.0) * 100.0,
            state.precipitation
        );
    }

    if debug_enabled {
        let sun = sun_times(now.date_naive(), location.latitude, location.longitude);
        log_pipe!();
        log_debug!("Sun events for {}:", now.date_naive());
        for (name, time) in sun.named_events() {
            log_indented!("{:>10}: {}", name, time.format("%H:%M:%S"));
        }
    }

    let result = compute_cct(
        location.latitude,
        location.longitude,
        now,
        &bounds,
        curve,
        weather.as_ref(),
    );

    log_block_start!("Target at {}", now.format("%Y-%m-%d %H:%M:%S %Z"));
    log_indented!("Color temperature: {} K", result.cct);
    log_indented!(
        "Intensity: {} ({:.1}%)",
        result.intensity,
        f64::from(result.intensity) / 10.0
    );
    log_indented!("Estimated output: {} lx", result.light_output);

    // Calibration inversion: what should the device be driven at to reach a
    // lux target, given the rig's cap at this color temperature
    if let Some(map) = config.max_lux_map() {
        let target = match overrides.target_lux.as_deref() {
            Some(v) => v
                .parse::<f64>()
                .with_context(|| format!("Invalid --target-lux '{v}'"))?,
            None => f64::from(result.light_output),
        };
        let device = map.intensity_for_lux(f64::from(result.cct), target);
        log_indented!(
            "Device intensity for {:.0} lx at {} K: {}",
            target,
            result.cct,
            device
        );
    } else if overrides.target_lux.is_some() {
        log_pipe!();
        log_warning!("--target-lux given but no max_lux calibration is configured");
    }

    log_end!();
    Ok(())
}

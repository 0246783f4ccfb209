//! Implementation of the `schedule` subcommand: build a full-day schedule.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::args::EvalOverrides;
use crate::config::Config;
use crate::curve::CurveType;
use crate::geo::solar::timezone_for_coordinates;
use crate::logger::Log;
use crate::schedule::build_schedule;

use super::{resolve_curve, resolve_location, resolve_weather};

/// Build a schedule and either summarize it or emit it as JSON.
pub fn handle_schedule(
    debug_enabled: bool,
    overrides: &EvalOverrides,
    date: Option<String>,
    curves: Option<String>,
    json: bool,
) -> Result<()> {
    // JSON output owns stdout; keep the logger quiet so the result stays
    // machine-readable
    if json {
        Log::set_enabled(false);
    }

    log_version!();

    let config = Config::load()?;
    let location = resolve_location(&config, overrides)?;
    let weather = resolve_weather(overrides)?;
    let bounds = config.bounds();

    let curve_list = match curves.as_deref() {
        Some(list) => list
            .split(',')
            .map(|token| token.parse::<CurveType>().map_err(Into::into))
            .collect::<Result<Vec<_>>>()?,
        None => vec![resolve_curve(&config, overrides)?],
    };

    let tz = timezone_for_coordinates(location.latitude, location.longitude);
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid --date '{raw}' (expected YYYY-MM-DD)"))?,
        None => crate::time_source::now().with_timezone(&tz).date_naive(),
    };

    let schedule = build_schedule(
        location.latitude,
        location.longitude,
        date,
        &bounds,
        &curve_list,
        config.interval_minutes(),
        config.buffer_minutes(),
        config.include_sun_events(),
        location.source,
        weather.as_ref(),
    );

    log_block_start!("Schedule for {} at {:.4}, {:.4}", date, location.latitude, location.longitude);
    log_indented!("Timezone: {}", schedule.timezone);
    log_indented!(
        "Curves: {}",
        schedule
            .curves
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if let (Some(first), Some(last)) = (schedule.points.first(), schedule.points.last()) {
        log_indented!(
            "Window: {} to {} ({} points)",
            first.timestamp.format("%H:%M:%S"),
            last.timestamp.format("%H:%M:%S"),
            schedule.points.len()
        );
    }

    if debug_enabled {
        log_pipe!();
        log_debug!("Sun events:");
        for (name, time) in schedule.sun_times.named_events() {
            log_indented!("{:>10}: {}", name, time.format("%H:%M:%S"));
        }
    }

    log_end!();

    if json {
        let rendered = serde_json::to_string_pretty(&schedule)
            .context("Failed to serialize schedule to JSON")?;
        println!("{rendered}");
    }

    Ok(())
}

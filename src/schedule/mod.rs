//! Full-day schedule assembly.
//!
//! A schedule is a one-shot batch transform: resolve the day's sun times,
//! build a bounded evaluation window, lay a regular timestamp grid across it,
//! merge in the named sun events, and evaluate the engine for every requested
//! curve at every point. Points are strictly time-ordered and deduplicated.
//!
//! Nothing here is persisted; the schedule lives in memory for the duration
//! of a command and is handed to downstream consumers (JSON export, hardware
//! application) as a value.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::EVENT_TAG_TOLERANCE_SECS;
use crate::curve::CurveType;
use crate::engine::weather::WeatherState;
use crate::engine::{CctBounds, CctResult, compute_with_sun_times};
use crate::geo::solar::{SunTimes, sun_times, timezone_for_coordinates};

/// One evaluated instant within a schedule.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulePoint {
    pub timestamp: DateTime<Tz>,
    /// Sun event name when this point lies within the tagging tolerance of one.
    pub event: Option<&'static str>,
    /// Computed target per requested curve.
    pub values: BTreeMap<CurveType, CctResult>,
}

/// A computed full-day schedule.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    /// Where the coordinates came from (config file, CLI override).
    pub location_source: String,
    pub timezone: Tz,
    pub sun_times: SunTimes,
    /// The curves evaluated at every point, in request order.
    pub curves: Vec<CurveType>,
    /// Strictly increasing in timestamp, no duplicates.
    pub points: Vec<SchedulePoint>,
}

/// Build a schedule for one calendar day at one location.
///
/// The evaluation window spans from the earliest to the latest relevant sun
/// event, padded by `buffer_minutes` on each side; `nadir` is excluded from
/// the window calculation since it sits mid-night. When no sun events are
/// available (polar conditions, invalid coordinates) the window falls back
/// to the full calendar day in the coordinate timezone.
#[allow(clippy::too_many_arguments)]
pub fn build_schedule(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    bounds: &CctBounds,
    curves: &[CurveType],
    interval_minutes: u32,
    buffer_minutes: u32,
    include_sun_events: bool,
    location_source: &str,
    weather: Option<&WeatherState>,
) -> Schedule {
    let tz = timezone_for_coordinates(latitude, longitude);
    let sun = sun_times(date, latitude, longitude);

    let (window_start, window_end) = evaluation_window(&sun, date, tz, buffer_minutes);

    // Regular grid across the window
    let step = Duration::minutes(i64::from(interval_minutes.max(1)));
    let mut timestamps = Vec::new();
    let mut cursor = window_start;
    while cursor <= window_end {
        timestamps.push(cursor);
        cursor += step;
    }

    // Merge named events falling inside the window
    if include_sun_events {
        for (_, event_time) in sun.named_events() {
            if event_time >= window_start && event_time <= window_end {
                timestamps.push(event_time);
            }
        }
    }

    timestamps.sort();
    timestamps.dedup_by_key(|t| t.timestamp_millis());

    let points = timestamps
        .into_iter()
        .map(|timestamp| {
            let values = curves
                .iter()
                .map(|&curve| {
                    let result = compute_with_sun_times(
                        &sun, latitude, longitude, timestamp, bounds, curve, weather,
                    );
                    (curve, result)
                })
                .collect();
            SchedulePoint {
                timestamp,
                event: tag_for(&sun, timestamp),
                values,
            }
        })
        .collect();

    Schedule {
        date,
        latitude,
        longitude,
        location_source: location_source.to_string(),
        timezone: tz,
        sun_times: sun,
        curves: curves.to_vec(),
        points,
    }
}

/// The bounded day window to evaluate across.
fn evaluation_window(
    sun: &SunTimes,
    date: NaiveDate,
    tz: Tz,
    buffer_minutes: u32,
) -> (DateTime<Tz>, DateTime<Tz>) {
    let buffer = Duration::minutes(i64::from(buffer_minutes));

    let relevant: Vec<DateTime<Tz>> = sun
        .named_events()
        .into_iter()
        .filter(|(name, _)| *name != "nadir")
        .map(|(_, t)| t)
        .collect();

    match (relevant.iter().min(), relevant.iter().max()) {
        (Some(&earliest), Some(&latest)) => (earliest - buffer, latest + buffer),
        _ => {
            // Full calendar day in the coordinate timezone. earliest() picks
            // the valid instant when midnight lands in a DST gap.
            let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
            let start = tz
                .from_local_datetime(&midnight)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&midnight));
            (start, start + Duration::days(1))
        }
    }
}

/// The sun event name closest to `at`, if any lies within the tolerance.
fn tag_for(sun: &SunTimes, at: DateTime<Tz>) -> Option<&'static str> {
    sun.named_events()
        .into_iter()
        .map(|(name, t)| {
            let distance = (t.timestamp() - at.timestamp()).abs();
            (name, distance)
        })
        .filter(|&(_, distance)| distance <= EVENT_TAG_TOLERANCE_SECS)
        .min_by_key(|&(_, distance)| distance)
        .map(|(name, _)| name)
}

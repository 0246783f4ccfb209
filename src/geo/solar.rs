//! Astronomical calculations: sun event times and solar altitude.
//!
//! Event timestamps come from the `sunrise` crate, guarded by hour-angle
//! domain checks so that events which do not occur on a given day (polar day,
//! polar night, missing astronomical twilight at high summer latitudes) are
//! reported as `None` instead of synthesized times. Solar noon, nadir, and the
//! instantaneous altitude use the NOAA fractional-year approximations, which
//! are accurate to well under a minute for the years this tool cares about.
//!
//! All returned timestamps carry the coordinate timezone. Storing full
//! `DateTime<Tz>` values keeps day-boundary and cross-timezone comparisons
//! trivial throughout the pipeline.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::f64::consts::PI;
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};
use tzf_rs::DefaultFinder;

/// Shared timezone finder. Building one parses the embedded polygon data, so
/// it is created once and reused.
static TZ_FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Standard sunrise/sunset zenith angle in degrees (refraction + solar radius).
const SUNRISE_SUNSET_ZENITH: f64 = 90.833;

/// Civil twilight zenith angle in degrees.
const CIVIL_TWILIGHT_ZENITH: f64 = 96.0;

/// Astronomical twilight zenith angle in degrees.
const ASTRONOMICAL_TWILIGHT_ZENITH: f64 = 108.0;

/// Named sun event timestamps for one day at one location.
///
/// Every field is optional; absence means the event does not occur on that
/// day at that latitude. Consumers must branch on presence - that is the
/// actual domain semantics of polar day/night, not an error state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SunTimes {
    /// Sun crosses the horizon upward.
    pub sunrise: Option<DateTime<Tz>>,
    /// Sun crosses the horizon downward.
    pub sunset: Option<DateTime<Tz>>,
    /// Daily maximum solar altitude.
    pub solar_noon: Option<DateTime<Tz>>,
    /// End of astronomical twilight in the morning (sky fully light).
    pub night_end: Option<DateTime<Tz>>,
    /// Start of astronomical twilight in the evening (sky fully dark after).
    pub night: Option<DateTime<Tz>>,
    /// Start of civil twilight in the morning.
    pub dawn: Option<DateTime<Tz>>,
    /// End of civil twilight in the evening.
    pub dusk: Option<DateTime<Tz>>,
    /// Daily minimum solar altitude (middle of the night).
    pub nadir: Option<DateTime<Tz>>,
}

impl SunTimes {
    /// All defined events with their names, in canonical day order.
    pub fn named_events(&self) -> Vec<(&'static str, DateTime<Tz>)> {
        [
            ("nadir", self.nadir),
            ("night_end", self.night_end),
            ("dawn", self.dawn),
            ("sunrise", self.sunrise),
            ("solar_noon", self.solar_noon),
            ("sunset", self.sunset),
            ("dusk", self.dusk),
            ("night", self.night),
        ]
        .into_iter()
        .filter_map(|(name, t)| t.map(|t| (name, t)))
        .collect()
    }
}

/// Resolve the timezone a coordinate pair falls in.
///
/// Ocean coordinates and lookup misses fall back to UTC.
pub fn timezone_for_coordinates(latitude: f64, longitude: f64) -> Tz {
    let name = TZ_FINDER.get_tz_name(longitude, latitude);
    name.parse::<Tz>().unwrap_or(chrono_tz::UTC)
}

/// Compute the sun event times for a calendar day at a location.
///
/// Returns an all-`None` result for coordinates outside the valid range
/// rather than failing; the engine's documented fallbacks take over.
pub fn sun_times(date: NaiveDate, latitude: f64, longitude: f64) -> SunTimes {
    let Some(coord) = Coordinates::new(latitude, longitude) else {
        return SunTimes::default();
    };
    let tz = timezone_for_coordinates(latitude, longitude);
    let solar_day = SolarDay::new(coord, date);

    let declination = solar_declination(date);
    let lat_rad = latitude.to_radians();

    // An event exists only if the sun actually crosses its zenith threshold
    // on this day; event_time would otherwise return a clamped placeholder.
    let event_if_occurs = |zenith_deg: f64, event: SolarEvent| -> Option<DateTime<Tz>> {
        if !crosses_zenith(lat_rad, declination, zenith_deg) {
            return None;
        }
        Some(solar_day.event_time(event).with_timezone(&tz))
    };

    let sunrise = event_if_occurs(SUNRISE_SUNSET_ZENITH, SolarEvent::Sunrise);
    let sunset = event_if_occurs(SUNRISE_SUNSET_ZENITH, SolarEvent::Sunset);
    let dawn = event_if_occurs(CIVIL_TWILIGHT_ZENITH, SolarEvent::Dawn(DawnType::Civil));
    let dusk = event_if_occurs(CIVIL_TWILIGHT_ZENITH, SolarEvent::Dusk(DawnType::Civil));
    let night_end = event_if_occurs(
        ASTRONOMICAL_TWILIGHT_ZENITH,
        SolarEvent::Dawn(DawnType::Astronomical),
    );
    let night = event_if_occurs(
        ASTRONOMICAL_TWILIGHT_ZENITH,
        SolarEvent::Dusk(DawnType::Astronomical),
    );

    let solar_noon = solar_noon_utc(date, longitude).map(|t| t.with_timezone(&tz));
    let nadir = solar_noon.map(|noon| noon - Duration::hours(12));

    SunTimes {
        sunrise,
        sunset,
        solar_noon,
        night_end,
        night,
        dawn,
        dusk,
        nadir,
    }
}

/// Instantaneous solar altitude in radians at a moment and location.
///
/// Negative values mean the sun is below the horizon.
pub fn solar_altitude(at: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    let gamma = fractional_year(at.date_naive(), fractional_hour_utc(at));
    let declination = declination_from_gamma(gamma);
    let eot_minutes = equation_of_time_minutes(gamma);

    // True solar time in minutes, then hour angle in degrees
    let minutes_utc =
        f64::from(at.hour()) * 60.0 + f64::from(at.minute()) + f64::from(at.second()) / 60.0;
    let true_solar_minutes = minutes_utc + eot_minutes + 4.0 * longitude;
    let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();

    let lat_rad = latitude.to_radians();
    let sin_alt = lat_rad.sin() * declination.sin()
        + lat_rad.cos() * declination.cos() * hour_angle.cos();
    sin_alt.clamp(-1.0, 1.0).asin()
}

/// Whether the sun crosses the given zenith angle at this latitude and
/// declination. `|cos H0| > 1` means it stays entirely above or entirely
/// below the threshold all day.
fn crosses_zenith(lat_rad: f64, declination: f64, zenith_deg: f64) -> bool {
    let zenith = zenith_deg.to_radians();
    let denom = lat_rad.cos() * declination.cos();
    if denom.abs() < 1e-9 {
        return false;
    }
    let cos_h0 = (zenith.cos() - lat_rad.sin() * declination.sin()) / denom;
    cos_h0.abs() <= 1.0
}

/// Solar noon for a date and longitude, from the equation of time.
fn solar_noon_utc(date: NaiveDate, longitude: f64) -> Option<DateTime<Utc>> {
    let gamma = fractional_year(date, 12.0);
    let eot_minutes = equation_of_time_minutes(gamma);
    let noon_minutes = 720.0 - 4.0 * longitude - eot_minutes;
    let noon_secs = (noon_minutes * 60.0).round() as i64;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight) + Duration::seconds(noon_secs))
}

/// Solar declination in radians for the given date (midday value).
fn solar_declination(date: NaiveDate) -> f64 {
    declination_from_gamma(fractional_year(date, 12.0))
}

/// NOAA fractional year in radians.
fn fractional_year(date: NaiveDate, hour: f64) -> f64 {
    let day_of_year = f64::from(date.ordinal());
    2.0 * PI / 365.0 * (day_of_year - 1.0 + (hour - 12.0) / 24.0)
}

fn fractional_hour_utc(at: DateTime<Utc>) -> f64 {
    f64::from(at.hour())
        + f64::from(at.minute()) / 60.0
        + f64::from(at.second()) / 3600.0
}

/// NOAA declination series (radians).
fn declination_from_gamma(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

/// NOAA equation of time series (minutes).
fn equation_of_time_minutes(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_solstice() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    fn december_solstice() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()
    }

    #[test]
    fn london_summer_day_has_all_horizon_events() {
        let times = sun_times(june_solstice(), 51.5074, -0.1278);
        assert!(times.sunrise.is_some());
        assert!(times.sunset.is_some());
        assert!(times.solar_noon.is_some());
        // London is above 48.5°N, so astronomical twilight never completes
        // near the June solstice
        assert!(times.night_end.is_none());
        assert!(times.night.is_none());
    }

    #[test]
    fn equator_has_full_event_set() {
        let times = sun_times(june_solstice(), 0.0, 0.0);
        assert!(times.sunrise.is_some());
        assert!(times.sunset.is_some());
        assert!(times.night_end.is_some());
        assert!(times.night.is_some());
        assert!(times.dawn.is_some());
        assert!(times.dusk.is_some());
    }

    #[test]
    fn polar_night_has_no_horizon_crossings() {
        // Longyearbyen in December: the sun never rises
        let times = sun_times(december_solstice(), 78.2232, 15.6267);
        assert!(times.sunrise.is_none());
        assert!(times.sunset.is_none());
        // Solar noon (the altitude extremum) still exists
        assert!(times.solar_noon.is_some());
    }

    #[test]
    fn polar_day_has_no_horizon_crossings() {
        let times = sun_times(june_solstice(), 78.2232, 15.6267);
        assert!(times.sunrise.is_none());
        assert!(times.sunset.is_none());
    }

    #[test]
    fn invalid_coordinates_degrade_to_empty() {
        let times = sun_times(june_solstice(), 120.0, 400.0);
        assert!(times.named_events().is_empty());
    }

    #[test]
    fn altitude_is_positive_at_midday_negative_at_midnight() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        // Greenwich: local time ~ UTC
        assert!(solar_altitude(noon, 51.5, 0.0) > 0.0);
        assert!(solar_altitude(midnight, 51.5, 0.0) < 0.0);
    }

    #[test]
    fn altitude_peaks_at_solar_noon() {
        let date = june_solstice();
        let times = sun_times(date, 40.7128, -74.0060);
        let noon = times.solar_noon.unwrap().with_timezone(&Utc);
        let noon_alt = solar_altitude(noon, 40.7128, -74.0060);
        for offset_hours in [-3i64, -1, 1, 3] {
            let other = noon + Duration::hours(offset_hours);
            assert!(
                solar_altitude(other, 40.7128, -74.0060) < noon_alt,
                "altitude at noon{offset_hours:+}h should be below the noon maximum"
            );
        }
    }

    #[test]
    fn events_are_ordered_within_the_day() {
        let times = sun_times(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), 40.7128, -74.0060);
        let events = times.named_events();
        // nadir comes first by construction; the rest must be ascending
        for pair in events.windows(2) {
            assert!(
                pair[0].1 <= pair[1].1,
                "{} at {} is after {} at {}",
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1
            );
        }
    }

    #[test]
    fn nyc_resolves_to_eastern_time() {
        let tz = timezone_for_coordinates(40.7128, -74.0060);
        assert_eq!(tz.to_string(), "America/New_York");
    }
}

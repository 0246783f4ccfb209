//! The CCT engine: target color temperature and intensity for one instant.
//!
//! `compute_cct` is the core routine: (location, timestamp, bounds, curve,
//! optional weather) to a CCT/intensity/light-output triple. Scientific
//! curves are anchored to the instantaneous solar altitude (robust across
//! seasons and latitudes); empirical curves are anchored to the elapsed
//! fraction of the light-to-dark window. Both degrade gracefully when sun
//! data is partial: the visible failure mode of a lighting controller must be
//! "go to the safe default", never "crash".

pub mod maxlux;
pub mod weather;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::constants::{
    INTENSITY_SCALE, LUX_SCALE_CONSTANT, MAXIMUM_BRIGHTNESS, MAXIMUM_TEMP, MINIMUM_BRIGHTNESS,
    MINIMUM_TEMP, NIGHT_WINDOW_PAD_MINUTES,
};
use crate::curve::{self, CurveFamily, CurveType};
use crate::geo::solar::{SunTimes, solar_altitude, sun_times};
use weather::WeatherState;

/// Normalized CCT and intensity bounds for one evaluation.
///
/// Construction clamps temperatures to the supported Kelvin range and
/// percentages to [0,100], swapping min/max when given in the wrong order.
/// Intensity bounds are carried internally on the device 0-1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CctBounds {
    pub min_k: u32,
    pub max_k: u32,
    pub min_intensity: u32,
    pub max_intensity: u32,
}

impl CctBounds {
    /// Build bounds from Kelvin limits and brightness percentages.
    pub fn new(min_k: u32, max_k: u32, min_pct: f64, max_pct: f64) -> Self {
        let mut min_k = min_k.clamp(MINIMUM_TEMP, MAXIMUM_TEMP);
        let mut max_k = max_k.clamp(MINIMUM_TEMP, MAXIMUM_TEMP);
        if min_k > max_k {
            std::mem::swap(&mut min_k, &mut max_k);
        }

        let mut min_pct = min_pct.clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS);
        let mut max_pct = max_pct.clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS);
        if min_pct > max_pct {
            std::mem::swap(&mut min_pct, &mut max_pct);
        }

        Self {
            min_k,
            max_k,
            min_intensity: (min_pct * INTENSITY_SCALE).round() as u32,
            max_intensity: (max_pct * INTENSITY_SCALE).round() as u32,
        }
    }

    /// The minimum-bound result: warm floor, dim floor, no light output.
    /// This is the safe default every degraded path falls back to.
    pub fn floor_result(&self) -> CctResult {
        CctResult {
            cct: self.min_k,
            intensity: self.min_intensity,
            light_output: 0,
        }
    }

    fn scale_cct(&self, factor: f64) -> u32 {
        (f64::from(self.min_k) + f64::from(self.max_k - self.min_k) * factor).round() as u32
    }

    fn scale_intensity(&self, factor: f64) -> u32 {
        (f64::from(self.min_intensity)
            + f64::from(self.max_intensity - self.min_intensity) * factor)
            .round() as u32
    }
}

impl Default for CctBounds {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_MIN_TEMP,
            crate::constants::DEFAULT_MAX_TEMP,
            crate::constants::DEFAULT_MIN_BRIGHTNESS,
            crate::constants::DEFAULT_MAX_BRIGHTNESS,
        )
    }
}

/// One computed lighting target.
///
/// Immutable value type; `cct` in Kelvin, `intensity` on the device 0-1000
/// scale (tenths of a percent), `light_output` an estimated lux figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CctResult {
    pub cct: u32,
    pub intensity: u32,
    pub light_output: u32,
}

/// Compute the lighting target for one instant at one location.
///
/// Fetches the day's sun times for the coordinate, evaluates the requested
/// curve, and applies the weather adjustment when weather state is supplied.
/// Never fails: astronomically unusual inputs degrade to the minimum-bound
/// result.
pub fn compute_cct(
    latitude: f64,
    longitude: f64,
    at: DateTime<Tz>,
    bounds: &CctBounds,
    curve: CurveType,
    weather: Option<&WeatherState>,
) -> CctResult {
    let sun = sun_times(at.date_naive(), latitude, longitude);
    compute_with_sun_times(&sun, latitude, longitude, at, bounds, curve, weather)
}

/// Curve evaluation against already-resolved sun times.
///
/// Split out from [`compute_cct`] so tests can inject hand-built `SunTimes`
/// (polar conditions, missing twilight) without depending on the calendar.
pub fn compute_with_sun_times(
    sun: &SunTimes,
    latitude: f64,
    longitude: f64,
    at: DateTime<Tz>,
    bounds: &CctBounds,
    curve: CurveType,
    weather: Option<&WeatherState>,
) -> CctResult {
    let base = match curve.family() {
        CurveFamily::SolarAltitude => {
            scientific_target(sun, latitude, longitude, at, bounds, curve)
        }
        CurveFamily::TimeFraction => {
            empirical_target(sun, latitude, longitude, at, bounds, curve)
        }
    };

    match weather {
        Some(state) => weather::adjust(&base, state),
        None => base,
    }
}

/// Altitude-anchored evaluation for the scientific curve family.
fn scientific_target(
    sun: &SunTimes,
    latitude: f64,
    longitude: f64,
    at: DateTime<Tz>,
    bounds: &CctBounds,
    curve: CurveType,
) -> CctResult {
    // No daily altitude extremum to normalize against
    let Some(noon) = sun.solar_noon else {
        return bounds.floor_result();
    };

    if let (Some(sunrise), Some(sunset)) = (sun.sunrise, sun.sunset) {
        let (light_start, light_end) = match (sun.night_end, sun.night) {
            (Some(night_end), Some(night)) => (night_end, night),
            _ => (
                sunrise - Duration::minutes(NIGHT_WINDOW_PAD_MINUTES),
                sunset + Duration::minutes(NIGHT_WINDOW_PAD_MINUTES),
            ),
        };
        if at <= light_start || at >= light_end {
            return bounds.floor_result();
        }
    }

    let altitude = solar_altitude(at.with_timezone(&Utc), latitude, longitude);
    let noon_altitude = solar_altitude(noon.with_timezone(&Utc), latitude, longitude);
    if altitude <= 0.0 || noon_altitude <= 0.0 {
        return bounds.floor_result();
    }

    let ratio = (altitude / noon_altitude).clamp(0.0, 1.0);
    let factors = curve::altitude_factors(curve, ratio);

    CctResult {
        cct: bounds.scale_cct(factors.cct),
        intensity: bounds.scale_intensity(factors.intensity),
        light_output: (factors.raw * LUX_SCALE_CONSTANT).round() as u32,
    }
}

/// Day-progress evaluation for the empirical curve family.
fn empirical_target(
    sun: &SunTimes,
    latitude: f64,
    longitude: f64,
    at: DateTime<Tz>,
    bounds: &CctBounds,
    curve: CurveType,
) -> CctResult {
    if let (Some(sunrise), Some(sunset), Some(noon), Some(night_end), Some(night)) =
        (sun.sunrise, sun.sunset, sun.solar_noon, sun.night_end, sun.night)
        && sunset > sunrise
        && sunrise < noon
        && noon < sunset
    {
        if at <= night_end || at >= night {
            return bounds.floor_result();
        }

        // Morning half maps [night_end, noon] onto [0, 0.5], afternoon half
        // maps [noon, night] onto [0.5, 1]
        let x = if at <= noon {
            0.5 * window_fraction(night_end, noon, at)
        } else {
            0.5 + 0.5 * window_fraction(noon, night, at)
        };

        let factor = curve::evaluate(curve, x);
        let altitude = solar_altitude(at.with_timezone(&Utc), latitude, longitude);
        let lux_factor = factor * altitude.sin().max(0.0);

        return CctResult {
            cct: bounds.scale_cct(factor),
            intensity: bounds.scale_intensity(factor),
            light_output: (lux_factor * LUX_SCALE_CONSTANT).round() as u32,
        };
    }

    // Incomplete sun data: pure altitude heuristic
    let altitude = solar_altitude(at.with_timezone(&Utc), latitude, longitude);
    if altitude <= 0.0 {
        return bounds.floor_result();
    }
    let factor = altitude.sin().max(0.0).min(1.0);
    CctResult {
        cct: bounds.scale_cct(factor),
        intensity: bounds.scale_intensity(factor),
        light_output: (factor * LUX_SCALE_CONSTANT).round() as u32,
    }
}

/// Linear position of `at` within [start, end], clamped to [0,1].
fn window_fraction(start: DateTime<Tz>, end: DateTime<Tz>, at: DateTime<Tz>) -> f64 {
    let total = end.timestamp_millis() - start.timestamp_millis();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = at.timestamp_millis() - start.timestamp_millis();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    fn utc_time(h: u32, m: u32) -> DateTime<Tz> {
        chrono_tz::UTC
            .with_ymd_and_hms(2024, 6, 21, h, m, 0)
            .unwrap()
    }

    /// Equator-at-Greenwich sun times, rounded to friendly values.
    fn full_sun_times() -> SunTimes {
        SunTimes {
            sunrise: Some(utc_time(6, 0)),
            sunset: Some(utc_time(18, 0)),
            solar_noon: Some(utc_time(12, 0)),
            night_end: Some(utc_time(4, 40)),
            night: Some(utc_time(19, 20)),
            dawn: Some(utc_time(5, 35)),
            dusk: Some(utc_time(18, 25)),
            nadir: Some(utc_time(0, 0)),
        }
    }

    fn bounds() -> CctBounds {
        CctBounds::new(2000, 6500, 5.0, 100.0)
    }

    #[test]
    fn bounds_swap_when_reversed() {
        let b = CctBounds::new(6500, 2000, 100.0, 5.0);
        assert_eq!(b.min_k, 2000);
        assert_eq!(b.max_k, 6500);
        assert_eq!(b.min_intensity, 50);
        assert_eq!(b.max_intensity, 1000);
    }

    #[test]
    fn bounds_clamp_to_supported_ranges() {
        let b = CctBounds::new(100, 90000, -5.0, 250.0);
        assert_eq!(b.min_k, 1000);
        assert_eq!(b.max_k, 20000);
        assert_eq!(b.min_intensity, 0);
        assert_eq!(b.max_intensity, 1000);
    }

    #[test]
    fn hann_at_solar_noon_hits_the_maximum_bounds() {
        let sun = full_sun_times();
        let result = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            utc_time(12, 0),
            &bounds(),
            CurveType::Hann,
            None,
        );
        // x lands near 0.5 at noon; hann(0.5) = 1
        assert_eq!(result.cct, 6500);
        assert_eq!(result.intensity, 1000);
    }

    #[test]
    fn empirical_night_window_boundaries_yield_the_floor() {
        let sun = full_sun_times();
        let b = bounds();
        for at in [utc_time(4, 40), utc_time(4, 0), utc_time(19, 20), utc_time(23, 0)] {
            let result =
                compute_with_sun_times(&sun, 0.0, 0.0, at, &b, CurveType::Hann, None);
            assert_eq!(result, b.floor_result(), "expected floor at {at}");
        }
    }

    #[test]
    fn scientific_missing_solar_noon_yields_the_floor() {
        let sun = SunTimes::default();
        let b = bounds();
        let result = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            utc_time(12, 0),
            &b,
            CurveType::SunAltitude,
            None,
        );
        assert_eq!(result, b.floor_result());
    }

    #[test]
    fn scientific_synthesizes_night_window_without_twilight_data() {
        let mut sun = full_sun_times();
        sun.night_end = None;
        sun.night = None;
        let b = bounds();
        // 05:29 is within [sunrise - 30min, ...] but the sun is below horizon
        // at the equator then, so it still floors via the altitude check;
        // 05:20 is before the synthesized window start
        let before_window = utc_time(5, 20);
        let result = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            before_window,
            &b,
            CurveType::SunAltitude,
            None,
        );
        assert_eq!(result, b.floor_result());

        // Midday clearly inside the window produces a non-floor result
        let midday = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            utc_time(12, 0),
            &b,
            CurveType::SunAltitude,
            None,
        );
        assert!(midday.intensity > b.min_intensity);
        assert!(midday.cct > b.min_k);
    }

    #[test]
    fn empirical_incomplete_data_uses_altitude_heuristic() {
        let mut sun = full_sun_times();
        sun.night_end = None;
        sun.night = None;
        let b = bounds();
        // Daytime at the equator: heuristic should land above the floor
        let result = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            utc_time(12, 0),
            &b,
            CurveType::Hann,
            None,
        );
        assert!(result.intensity > b.min_intensity);
        // Deep night: heuristic floors
        let night = compute_with_sun_times(
            &sun,
            0.0,
            0.0,
            utc_time(0, 30),
            &b,
            CurveType::Hann,
            None,
        );
        assert_eq!(night, b.floor_result());
    }

    #[test]
    fn results_respect_bounds_across_the_day() {
        let sun = full_sun_times();
        let b = bounds();
        for curve in CurveType::ALL {
            for hour in 0..24 {
                let result = compute_with_sun_times(
                    &sun,
                    0.0,
                    0.0,
                    utc_time(hour, 0),
                    &b,
                    curve,
                    None,
                );
                assert!(
                    (b.min_k..=b.max_k).contains(&result.cct),
                    "{curve} cct {} out of bounds at {hour}:00",
                    result.cct
                );
                assert!(
                    (b.min_intensity..=b.max_intensity).contains(&result.intensity),
                    "{curve} intensity {} out of bounds at {hour}:00",
                    result.intensity
                );
            }
        }
    }
}

use chrono::NaiveDate;
use proptest::prelude::*;

use lumenr::curve::CurveType;
use lumenr::engine::{CctBounds, compute_cct};
use lumenr::geo::solar::timezone_for_coordinates;
use lumenr::schedule::build_schedule;

/// Generate valid latitude values
fn latitude_strategy() -> impl Strategy<Value = f64> {
    -90.0..=90.0
}

/// Generate valid longitude values
fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..=180.0
}

/// Generate a calendar day across the seasons of one year
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=365).prop_map(|ordinal| {
        NaiveDate::from_yo_opt(2024, ordinal).expect("2024 has 366 days")
    })
}

/// Generate an arbitrary curve from the registry
fn curve_strategy() -> impl Strategy<Value = CurveType> {
    (0..CurveType::ALL.len()).prop_map(|i| CurveType::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every result respects the normalized bounds, pre-weather, for any
    /// location, time, bounds, and curve.
    #[test]
    fn results_stay_within_bounds(
        lat in latitude_strategy(),
        lon in longitude_strategy(),
        date in date_strategy(),
        hour in 0u32..24,
        minute in 0u32..60,
        temp_a in 1000u32..=20000,
        temp_b in 1000u32..=20000,
        pct_a in 0.0f64..=100.0,
        pct_b in 0.0f64..=100.0,
        curve in curve_strategy(),
    ) {
        let bounds = CctBounds::new(temp_a, temp_b, pct_a, pct_b);
        let tz = timezone_for_coordinates(lat, lon);
        let at = date
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_local_timezone(tz)
            .earliest();
        // Skip instants swallowed by a DST gap
        prop_assume!(at.is_some());
        let at = at.unwrap();

        let result = compute_cct(lat, lon, at, &bounds, curve, None);

        prop_assert!(
            (bounds.min_k..=bounds.max_k).contains(&result.cct),
            "cct {} outside [{}, {}] for {curve} at ({lat}, {lon}) {at}",
            result.cct, bounds.min_k, bounds.max_k
        );
        prop_assert!(
            (bounds.min_intensity..=bounds.max_intensity).contains(&result.intensity),
            "intensity {} outside [{}, {}] for {curve} at ({lat}, {lon}) {at}",
            result.intensity, bounds.min_intensity, bounds.max_intensity
        );
    }

    /// Schedule points are strictly increasing with no duplicate timestamps.
    #[test]
    fn schedules_are_strictly_ordered(
        lat in latitude_strategy(),
        lon in longitude_strategy(),
        date in date_strategy(),
        interval in 5u32..=120,
        buffer in 0u32..=180,
        include_events in proptest::bool::ANY,
    ) {
        let schedule = build_schedule(
            lat,
            lon,
            date,
            &CctBounds::default(),
            &[CurveType::Hann, CurveType::SunAltitude],
            interval,
            buffer,
            include_events,
            "test",
            None,
        );

        prop_assert!(!schedule.points.is_empty());
        for pair in schedule.points.windows(2) {
            prop_assert!(
                pair[0].timestamp < pair[1].timestamp,
                "points out of order: {} then {}",
                pair[0].timestamp,
                pair[1].timestamp
            );
        }
    }

    /// Every point evaluates every requested curve.
    #[test]
    fn schedule_points_cover_all_curves(
        lat in -60.0f64..=60.0,
        lon in longitude_strategy(),
        date in date_strategy(),
    ) {
        let curves = [CurveType::Hann, CurveType::Physics, CurveType::Hazy];
        let schedule = build_schedule(
            lat,
            lon,
            date,
            &CctBounds::default(),
            &curves,
            30,
            60,
            true,
            "test",
            None,
        );
        for point in &schedule.points {
            prop_assert_eq!(point.values.len(), curves.len());
        }
    }
}

//! Daylight curve models.
//!
//! A curve maps a normalized scalar in [0,1] to a [0,1] daylight factor used to
//! shape CCT and intensity transitions across the day. Curves come in two
//! families with different input domains:
//!
//! - **Time-fraction** curves (`hann`, `wider_middle_*`) take the normalized
//!   position of a timestamp within the light window (0 = astronomical dawn,
//!   0.5 = solar noon, 1 = astronomical dusk).
//! - **Solar-altitude** curves (the rest) take the ratio of the current solar
//!   altitude to the day's maximum altitude, anchoring output to sun geometry
//!   rather than elapsed time.
//!
//! Every curve is a pure function with no shared state. All curves are 0 at
//! x = 0 and reach their maximum in the interior of the domain.

mod empirical;
mod scientific;

pub use scientific::AltitudeFactors;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of available daylight curve models.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Smooth raised-cosine bell, zero at both ends, peak at midday.
    Hann,
    /// Trapezoid with a 30% flat plateau and quarter-sine ramps.
    WiderMiddleSmall,
    /// Trapezoid with a 60% flat plateau and quarter-sine ramps.
    WiderMiddleMedium,
    /// Trapezoid with an 80% flat plateau and quarter-sine ramps.
    WiderMiddleLarge,
    /// CIE daylight-gradation style saturating rise.
    CieDaylight,
    /// Direct altitude-ratio tracking, the most literal sun-following model.
    SunAltitude,
    /// Perez all-weather sky flavor with a softened shoulder.
    PerezDaylight,
    /// Beer-Lambert atmospheric attenuation over relative air mass.
    Physics,
    /// Blackbody-locus biased model, stays warm longer after dawn.
    Blackbody,
    /// Veiled-sky model with a capped peak and muted color swing.
    Hazy,
}

/// Input domain of a curve model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// Driven by normalized time-of-day fraction within the light window.
    TimeFraction,
    /// Driven by the normalized solar-altitude ratio.
    SolarAltitude,
}

impl CurveType {
    /// Every curve, in registry order.
    pub const ALL: [CurveType; 10] = [
        CurveType::Hann,
        CurveType::WiderMiddleSmall,
        CurveType::WiderMiddleMedium,
        CurveType::WiderMiddleLarge,
        CurveType::CieDaylight,
        CurveType::SunAltitude,
        CurveType::PerezDaylight,
        CurveType::Physics,
        CurveType::Blackbody,
        CurveType::Hazy,
    ];

    /// Which input domain this curve operates on.
    pub fn family(self) -> CurveFamily {
        match self {
            CurveType::Hann
            | CurveType::WiderMiddleSmall
            | CurveType::WiderMiddleMedium
            | CurveType::WiderMiddleLarge => CurveFamily::TimeFraction,
            CurveType::CieDaylight
            | CurveType::SunAltitude
            | CurveType::PerezDaylight
            | CurveType::Physics
            | CurveType::Blackbody
            | CurveType::Hazy => CurveFamily::SolarAltitude,
        }
    }

    /// The configuration/CLI token for this curve.
    pub fn name(self) -> &'static str {
        match self {
            CurveType::Hann => "hann",
            CurveType::WiderMiddleSmall => "wider_middle_small",
            CurveType::WiderMiddleMedium => "wider_middle_medium",
            CurveType::WiderMiddleLarge => "wider_middle_large",
            CurveType::CieDaylight => "cie_daylight",
            CurveType::SunAltitude => "sun_altitude",
            CurveType::PerezDaylight => "perez_daylight",
            CurveType::Physics => "physics",
            CurveType::Blackbody => "blackbody",
            CurveType::Hazy => "hazy",
        }
    }

    /// One-line description shown by the `curves` subcommand.
    pub fn description(self) -> &'static str {
        match self {
            CurveType::Hann => "raised-cosine bell over the light window",
            CurveType::WiderMiddleSmall => "trapezoid, 30% midday plateau",
            CurveType::WiderMiddleMedium => "trapezoid, 60% midday plateau",
            CurveType::WiderMiddleLarge => "trapezoid, 80% midday plateau",
            CurveType::CieDaylight => "CIE-style saturating rise on sun altitude",
            CurveType::SunAltitude => "linear tracking of the altitude ratio",
            CurveType::PerezDaylight => "Perez all-weather sky shoulder",
            CurveType::Physics => "atmospheric attenuation over air mass",
            CurveType::Blackbody => "warm-biased blackbody locus",
            CurveType::Hazy => "veiled sky with capped peak",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a curve name does not match any registered model.
///
/// The message enumerates the valid names so the CLI boundary can fail fast
/// with something actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCurveName {
    pub given: String,
}

impl fmt::Display for InvalidCurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = CurveType::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "unknown curve '{}' (valid curves: {})",
            self.given,
            valid.join(", ")
        )
    }
}

impl std::error::Error for InvalidCurveName {}

impl FromStr for CurveType {
    type Err = InvalidCurveName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        CurveType::ALL
            .iter()
            .copied()
            .find(|c| c.name() == token)
            .ok_or_else(|| InvalidCurveName {
                given: token.to_string(),
            })
    }
}

/// Evaluate a curve's daylight factor for `x` in [0,1].
///
/// For time-fraction curves `x` is the day-progress fraction; for
/// solar-altitude curves it is the altitude ratio and the returned value is
/// the model's raw intensity factor. Inputs outside [0,1] are clamped.
pub fn evaluate(curve: CurveType, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    match curve {
        CurveType::Hann => empirical::hann(x),
        CurveType::WiderMiddleSmall => empirical::wider_middle(x, 0.30),
        CurveType::WiderMiddleMedium => empirical::wider_middle(x, 0.60),
        CurveType::WiderMiddleLarge => empirical::wider_middle(x, 0.80),
        _ => altitude_factors(curve, x).raw,
    }
}

/// Evaluate a solar-altitude model at the given altitude ratio, producing the
/// (cct, intensity, raw) factor triple the engine maps onto its bounds.
///
/// Time-fraction curves fall back to a uniform triple of their shape so this
/// function is total over `CurveType`; the engine only routes altitude ratios
/// here for the solar-altitude family.
pub fn altitude_factors(curve: CurveType, ratio: f64) -> AltitudeFactors {
    let ratio = ratio.clamp(0.0, 1.0);
    match curve {
        CurveType::CieDaylight => scientific::cie_daylight(ratio),
        CurveType::SunAltitude => scientific::sun_altitude(ratio),
        CurveType::PerezDaylight => scientific::perez_daylight(ratio),
        CurveType::Physics => scientific::physics(ratio),
        CurveType::Blackbody => scientific::blackbody(ratio),
        CurveType::Hazy => scientific::hazy(ratio),
        _ => AltitudeFactors::uniform(evaluate(curve, ratio)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hann_endpoints_and_peak() {
        assert!(evaluate(CurveType::Hann, 0.0).abs() < 1e-12);
        assert!(evaluate(CurveType::Hann, 1.0).abs() < 1e-12);
        assert!((evaluate(CurveType::Hann, 0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wider_middle_plateaus() {
        // A plateau of width w is centered at 0.5, so 0.5 ± w/2 - eps sits on it
        for (curve, width) in [
            (CurveType::WiderMiddleSmall, 0.30),
            (CurveType::WiderMiddleMedium, 0.60),
            (CurveType::WiderMiddleLarge, 0.80),
        ] {
            let inner = 0.5 - width / 2.0 + 1e-6;
            assert!(
                (evaluate(curve, inner) - 1.0).abs() < 1e-9,
                "{curve} not flat at {inner}"
            );
            assert!((evaluate(curve, 0.5) - 1.0).abs() < 1e-12);
            assert!(evaluate(curve, 0.0).abs() < 1e-9);
            assert!(evaluate(curve, 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn all_curves_zero_at_domain_start() {
        for curve in CurveType::ALL {
            let f = evaluate(curve, 0.0);
            assert!(f.abs() < 1e-9, "{curve} is {f} at x=0");
        }
    }

    #[test]
    fn all_curves_bounded() {
        for curve in CurveType::ALL {
            for i in 0..=100 {
                let x = i as f64 / 100.0;
                let f = evaluate(curve, x);
                assert!((0.0..=1.0).contains(&f), "{curve}({x}) = {f}");
            }
        }
    }

    #[test]
    fn altitude_factors_bounded() {
        for curve in CurveType::ALL {
            for i in 0..=50 {
                let r = i as f64 / 50.0;
                let f = altitude_factors(curve, r);
                for v in [f.cct, f.intensity, f.raw] {
                    assert!((0.0..=1.0).contains(&v), "{curve}({r}) triple out of range");
                }
            }
        }
    }

    #[test]
    fn curve_names_round_trip() {
        for curve in CurveType::ALL {
            assert_eq!(curve.name().parse::<CurveType>().unwrap(), curve);
        }
    }

    #[test]
    fn unknown_curve_lists_valid_names() {
        let err = "sigmoid".parse::<CurveType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sigmoid"));
        assert!(message.contains("hann"));
        assert!(message.contains("perez_daylight"));
    }
}

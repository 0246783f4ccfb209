//! Solar-altitude curve models.
//!
//! Each model maps the normalized altitude ratio (current solar altitude over
//! the day's maximum) to a factor triple. The three components are mapped
//! independently by the engine: `cct` onto the Kelvin bounds, `intensity`
//! onto the device intensity bounds, and `raw` onto the lux output estimate.
//!
//! These are stylistic approximations of daylight behavior, not radiative
//! transfer. Inputs are pre-clamped to [0,1].

use std::f64::consts::FRAC_PI_2;

/// The (cct, intensity, raw) factor triple produced by an altitude model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeFactors {
    /// Factor mapped onto the [minK, maxK] color temperature range.
    pub cct: f64,
    /// Factor mapped onto the device intensity range.
    pub intensity: f64,
    /// Unbounded-side factor scaled to estimated lux output.
    pub raw: f64,
}

impl AltitudeFactors {
    /// A triple with all three components equal.
    pub fn uniform(f: f64) -> Self {
        Self {
            cct: f,
            intensity: f,
            raw: f,
        }
    }
}

/// CIE daylight-gradation flavor: saturating exponential rise. Color climbs
/// quickly after dawn, intensity lags slightly.
pub(super) fn cie_daylight(r: f64) -> AltitudeFactors {
    let g = (1.0 - (-3.2 * r).exp()) / (1.0 - (-3.2f64).exp());
    AltitudeFactors {
        cct: g,
        intensity: g.powf(1.1),
        raw: g,
    }
}

/// Literal altitude tracking: the factor is the ratio itself.
pub(super) fn sun_altitude(r: f64) -> AltitudeFactors {
    AltitudeFactors {
        cct: r,
        intensity: r.powf(0.9),
        raw: r,
    }
}

/// Perez all-weather sky flavor: sine shoulder with a softened color ramp.
pub(super) fn perez_daylight(r: f64) -> AltitudeFactors {
    let s = (FRAC_PI_2 * r).sin();
    AltitudeFactors {
        cct: s.powf(0.8),
        intensity: s.powf(1.25),
        raw: s.powf(1.15),
    }
}

/// Beer-Lambert attenuation over relative air mass (~1/r for a flat-earth
/// approximation near the interesting ratios). Transmission reaches 1 at noon
/// and collapses toward 0 as the sun approaches the horizon.
pub(super) fn physics(r: f64) -> AltitudeFactors {
    if r <= 0.0 {
        return AltitudeFactors::uniform(0.0);
    }
    let transmission = (-0.32 * (1.0 / r - 1.0)).exp();
    AltitudeFactors {
        cct: transmission.powf(0.5),
        intensity: transmission,
        raw: transmission,
    }
}

/// Blackbody-locus bias: color stays warm well past dawn while brightness
/// climbs faster, mimicking incandescent-like warm-up.
pub(super) fn blackbody(r: f64) -> AltitudeFactors {
    AltitudeFactors {
        cct: r.powf(1.6),
        intensity: r.powf(0.7),
        raw: r.powf(0.85),
    }
}

/// Veiled sky: the peak never reaches full output and the color swing is
/// muted, as under a persistent thin overcast.
pub(super) fn hazy(r: f64) -> AltitudeFactors {
    let s = (FRAC_PI_2 * r).sin();
    AltitudeFactors {
        cct: 0.9 * s.powf(0.9),
        intensity: 0.85 * s.powf(1.3),
        raw: 0.85 * s.powf(1.3),
    }
}

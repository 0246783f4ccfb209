//! Live-weather post-adjustment of a computed lighting target.
//!
//! A pure transform: cloud cover dims and neutralizes the base result, then
//! precipitation applies its own multiplier and color shift. The order is
//! fixed - cloud first, precipitation second - because the two compose
//! multiplicatively on intensity and sequentially on CCT blending. Values are
//! rounded to integers after each stage to stay bit-compatible with
//! previously generated schedules.
//!
//! The weather state itself is supplied by the caller; this module never
//! fetches anything.

use serde::{Deserialize, Serialize};

use crate::constants::OVERCAST_NEUTRAL_TEMP;
use crate::engine::CctResult;

/// Precipitation category reported by the external weather source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precipitation {
    #[default]
    None,
    Rain,
    Snow,
    Drizzle,
}

impl std::str::FromStr for Precipitation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Precipitation::None),
            "rain" => Ok(Precipitation::Rain),
            "snow" => Ok(Precipitation::Snow),
            "drizzle" => Ok(Precipitation::Drizzle),
            other => Err(anyhow::anyhow!(
                "unknown precipitation '{other}' (valid: none, rain, snow, drizzle)"
            )),
        }
    }
}

/// Current sky state, as delivered by the external weather source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// Cloud cover fraction in [0,1]; out-of-range input is clamped.
    pub cloud_cover: f64,
    #[serde(default)]
    pub precipitation: Precipitation,
}

/// Apply cloud cover and precipitation to a base result.
pub fn adjust(result: &CctResult, weather: &WeatherState) -> CctResult {
    let cover = weather.cloud_cover.clamp(0.0, 1.0);

    // Stage 1: cloud dimming and color neutralization. Clear sky keeps the
    // base result, full overcast leaves 20% output at a neutral 6500K.
    let cloud_factor = 1.0 - cover * 0.8;
    let mut intensity = (f64::from(result.intensity) * cloud_factor).round();
    let mut light_output = (f64::from(result.light_output) * cloud_factor).round();
    let mut cct =
        (f64::from(result.cct) * (1.0 - cover) + OVERCAST_NEUTRAL_TEMP * cover).round();

    // Stage 2: precipitation, on top of the cloud-adjusted values
    match weather.precipitation {
        Precipitation::Rain => {
            intensity = (intensity * 0.8).round();
            light_output = (light_output * 0.8).round();
            cct = (cct * 0.9 + 7000.0 * 0.1).round();
        }
        Precipitation::Snow => {
            intensity = (intensity * 0.9).round();
            light_output = (light_output * 0.9).round();
            cct = (cct * 0.8 + 8000.0 * 0.2).round();
        }
        Precipitation::Drizzle => {
            intensity = (intensity * 0.9).round();
            light_output = (light_output * 0.9).round();
        }
        Precipitation::None => {}
    }

    CctResult {
        cct: cct as u32,
        intensity: intensity as u32,
        light_output: light_output as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CctResult {
        CctResult {
            cct: 4200,
            intensity: 730,
            light_output: 6100,
        }
    }

    #[test]
    fn clear_sky_is_identity() {
        let clear = WeatherState {
            cloud_cover: 0.0,
            precipitation: Precipitation::None,
        };
        assert_eq!(adjust(&base(), &clear), base());
    }

    #[test]
    fn full_overcast_dims_to_one_fifth_and_neutralizes() {
        let overcast = WeatherState {
            cloud_cover: 1.0,
            precipitation: Precipitation::None,
        };
        let adjusted = adjust(&base(), &overcast);
        assert_eq!(adjusted.intensity, (730.0_f64 * 0.2).round() as u32);
        assert_eq!(adjusted.light_output, (6100.0_f64 * 0.2).round() as u32);
        assert_eq!(adjusted.cct, 6500);
    }

    #[test]
    fn cloud_cover_is_clamped() {
        let wild = WeatherState {
            cloud_cover: 3.5,
            precipitation: Precipitation::None,
        };
        let capped = WeatherState {
            cloud_cover: 1.0,
            precipitation: Precipitation::None,
        };
        assert_eq!(adjust(&base(), &wild), adjust(&base(), &capped));
    }

    #[test]
    fn rain_stacks_on_cloud_adjustment() {
        let rain = WeatherState {
            cloud_cover: 0.5,
            precipitation: Precipitation::Rain,
        };
        let adjusted = adjust(&base(), &rain);

        // Replays the documented stage order by hand
        let after_cloud_intensity = (730.0_f64 * 0.6).round();
        let after_cloud_cct = (4200.0_f64 * 0.5 + 6500.0 * 0.5).round();
        assert_eq!(adjusted.intensity, (after_cloud_intensity * 0.8).round() as u32);
        assert_eq!(adjusted.cct, (after_cloud_cct * 0.9 + 700.0).round() as u32);
    }

    #[test]
    fn drizzle_dims_without_color_shift() {
        let drizzle = WeatherState {
            cloud_cover: 0.0,
            precipitation: Precipitation::Drizzle,
        };
        let adjusted = adjust(&base(), &drizzle);
        assert_eq!(adjusted.cct, base().cct);
        assert_eq!(adjusted.intensity, (730.0_f64 * 0.9).round() as u32);
    }

    #[test]
    fn snow_blends_toward_cool_white() {
        let snow = WeatherState {
            cloud_cover: 0.0,
            precipitation: Precipitation::Snow,
        };
        let adjusted = adjust(&base(), &snow);
        assert_eq!(adjusted.cct, (4200.0_f64 * 0.8 + 1600.0).round() as u32);
        assert!(adjusted.cct > base().cct);
    }

    #[test]
    fn precipitation_parses_case_insensitively() {
        assert_eq!("Rain".parse::<Precipitation>().unwrap(), Precipitation::Rain);
        assert!("sleet".parse::<Precipitation>().is_err());
    }
}

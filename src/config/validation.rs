//! Configuration validation functionality.
//!
//! Provides validation to prevent impossible or problematic configurations
//! such as out-of-range coordinates, unusable temperature bounds, and
//! schedule grids too fine or too coarse to be meaningful.

use anyhow::Result;

use super::Config;
use crate::constants::*;
use crate::curve::CurveType;

/// Comprehensive configuration validation.
pub fn validate_config(config: &Config) -> Result<()> {
    // Geographic coordinates
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    // Curve name must match the registry; fail fast with the valid names
    if let Some(token) = config.curve.as_deref() {
        token.parse::<CurveType>()?;
    }

    // Temperature bounds. Out-of-order min/max is tolerated (the engine
    // swaps), but out-of-range values are a configuration mistake.
    for (name, value) in [("min_temp", config.min_temp), ("max_temp", config.max_temp)] {
        if let Some(temp) = value
            && !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&temp)
        {
            anyhow::bail!(
                "{} ({} K) must be between {} and {} Kelvin",
                name,
                temp,
                MINIMUM_TEMP,
                MAXIMUM_TEMP
            );
        }
    }

    for (name, value) in [
        ("min_brightness", config.min_brightness),
        ("max_brightness", config.max_brightness),
    ] {
        if let Some(pct) = value
            && !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&pct)
        {
            anyhow::bail!("{} ({}%) must be between 0 and 100 percent", name, pct);
        }
    }

    if let Some(interval) = config.interval_minutes
        && !(MINIMUM_INTERVAL_MINUTES..=MAXIMUM_INTERVAL_MINUTES).contains(&interval)
    {
        anyhow::bail!(
            "interval_minutes ({}) must be between {} and {} minutes",
            interval,
            MINIMUM_INTERVAL_MINUTES,
            MAXIMUM_INTERVAL_MINUTES
        );
    }

    if let Some(buffer) = config.buffer_minutes
        && buffer > MAXIMUM_BUFFER_MINUTES
    {
        anyhow::bail!(
            "buffer_minutes ({}) must be at most {} minutes",
            buffer,
            MAXIMUM_BUFFER_MINUTES
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let config = Config {
            min_temp: Some(500),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("min_temp"));
    }

    #[test]
    fn rejects_excessive_interval() {
        let config = Config {
            interval_minutes: Some(1000),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn tolerates_swapped_bounds() {
        let config = Config {
            min_temp: Some(6500),
            max_temp: Some(2000),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}

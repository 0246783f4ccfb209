//! Application constants and default values for lumenr.
//!
//! This module contains all the configuration defaults, validation limits,
//! and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_CURVE: &str = "hann";
pub const DEFAULT_MIN_TEMP: u32 = 2000; // Kelvin - candle-warm floor at the edges of the day
pub const DEFAULT_MAX_TEMP: u32 = 6500; // Kelvin - close to natural midday sunlight
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 5.0; // percent - dim floor, never fully dark
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 100.0; // percent - full output at solar noon
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15; // schedule grid spacing
pub const DEFAULT_BUFFER_MINUTES: u32 = 60; // padding around the first/last sun event
pub const DEFAULT_INCLUDE_SUN_EVENTS: bool = true;

// ═══ Validation Limits ═══
// These limits ensure user inputs are within reasonable and safe ranges

// Temperature limits (Kelvin scale)
pub const MINIMUM_TEMP: u32 = 1000; // Very warm candlelight-like
pub const MAXIMUM_TEMP: u32 = 20000; // Very cool blue light

// Brightness limits (percentage of full output)
pub const MINIMUM_BRIGHTNESS: f64 = 0.0;
pub const MAXIMUM_BRIGHTNESS: f64 = 100.0;

// Schedule grid limits
pub const MINIMUM_INTERVAL_MINUTES: u32 = 1;
pub const MAXIMUM_INTERVAL_MINUTES: u32 = 240; // 4 hours - anything coarser loses the curve shape
pub const MAXIMUM_BUFFER_MINUTES: u32 = 360;

// ═══ Simulation Constants ═══

/// Scale from a raw [0,1] daylight factor to estimated illuminance in lux.
/// Full factor corresponds to a bright-interior midday target, matching the
/// magnitude of typical rig calibration caps (8000-10000 lx).
pub const LUX_SCALE_CONSTANT: f64 = 10_000.0;

/// Neutral overcast sky color temperature the cloud adjustment blends toward.
pub const OVERCAST_NEUTRAL_TEMP: f64 = 6500.0;

/// Pad applied around sunrise/sunset when astronomical twilight data is
/// missing and a night window has to be synthesized.
pub const NIGHT_WINDOW_PAD_MINUTES: i64 = 30;

/// A schedule point is tagged with a sun event name when it lies within this
/// many seconds of the event.
pub const EVENT_TAG_TOLERANCE_SECS: i64 = 30;

/// Device intensity scale: configuration brightness is in percent, the wire
/// format is tenths of a percent (0-1000).
pub const INTENSITY_SCALE: f64 = 10.0;
pub const MAX_DEVICE_INTENSITY: u32 = 1000;

//! Geographic sun-position functionality.
//!
//! This module resolves, for a (date, latitude, longitude) triple, the named
//! sun event times and the instantaneous solar altitude that drive the CCT
//! engine, together with the coordinate timezone everything is expressed in.
//!
//! Any sun event may be absent: polar day and polar night are ordinary domain
//! states here, not errors, and consumers branch on `Option` presence.

pub mod solar;

pub use solar::{SunTimes, solar_altitude, sun_times, timezone_for_coordinates};

//! # Lumenr Library
//!
//! Internal library for the lumenr binary application.
//!
//! This library exists to enable testing of the simulation internals and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Curve Library**: `curve` module with the named daylight-curve models
//! - **Sun Position**: `geo` module for sun event times, solar altitude, and
//!   coordinate timezone resolution
//! - **Engine**: `engine` module computing target CCT/intensity/light-output,
//!   with weather post-adjustment and max-lux calibration inversion
//! - **Schedules**: `schedule` module assembling full-day evaluation schedules
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for CLI subcommands (current, schedule, curves)
//! - **Infrastructure**: logging and time source abstraction

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod curve;
pub mod engine;
pub mod geo;
pub mod schedule;
pub mod time_source;

// Re-exports for the most common call sites
pub use curve::CurveType;
pub use engine::{CctBounds, CctResult, compute_cct};
pub use schedule::{Schedule, build_schedule};

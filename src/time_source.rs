//! Time source abstraction for supporting both real and overridden time.
//!
//! This module provides a trait-based abstraction that allows the application
//! to use either real system time or a fixed time for testing purposes.
//! Schedule evaluation itself is a pure function of explicit timestamps; only
//! the `current` command needs to ask "what time is it now".

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time queries
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for deterministic tests of "now"-dependent paths.
#[cfg(any(test, feature = "testing-support"))]
pub struct FixedTimeSource(pub DateTime<Utc>);

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Install a custom time source. Only the first call wins; subsequent calls
/// are ignored, matching the process-lifetime semantics of OnceCell.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    let _ = TIME_SOURCE.set(source);
}

/// Get the current time from the active time source.
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .now()
}

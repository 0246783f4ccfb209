//! Max-lux calibration table: what a rig can actually deliver per CCT.
//!
//! A `MaxLuxMap` caps achievable illuminance as a function of color
//! temperature for a specific lighting rig. It supports piecewise-linear
//! interpolation between breakpoints and inversion of a lux target into a
//! device intensity fraction.
//!
//! Parsing is deliberately tolerant in shape but strict in content: any
//! malformed entry yields `None` (never an error), so the caller can try an
//! alternate interpretation of the input string.

use serde::Serialize;

use crate::constants::{DEFAULT_MAX_TEMP, MAX_DEVICE_INTENSITY};

/// Calibration table mapping CCT breakpoints to maximum achievable lux.
///
/// Breakpoints are strictly increasing; a one-entry map means "same cap at
/// all CCTs".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxLuxMap {
    entries: Vec<(u32, f64)>,
}

impl MaxLuxMap {
    /// Parse the breakpoint grammar `INT:NUMBER(,INT:NUMBER)*`, with
    /// whitespace around tokens ignored.
    ///
    /// Returns `None` on any malformed entry, non-numeric key or value,
    /// non-positive cap, or duplicate breakpoint.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut entries = Vec::new();
        for raw_entry in spec.split(',') {
            let (key, value) = raw_entry.split_once(':')?;
            let cct: u32 = key.trim().parse().ok()?;
            let max_lux: f64 = value.trim().parse().ok()?;
            if !max_lux.is_finite() || max_lux <= 0.0 {
                return None;
            }
            entries.push((cct, max_lux));
        }
        if entries.is_empty() {
            return None;
        }
        entries.sort_by_key(|&(cct, _)| cct);
        if entries.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            return None;
        }
        Some(Self { entries })
    }

    /// Parse either the breakpoint grammar or a bare positive number, the
    /// latter becoming a degenerate one-breakpoint map.
    pub fn parse_spec(spec: &str) -> Option<Self> {
        if let Some(map) = Self::parse(spec) {
            return Some(map);
        }
        let scalar: f64 = spec.trim().parse().ok()?;
        if !scalar.is_finite() || scalar <= 0.0 {
            return None;
        }
        Some(Self::flat(scalar))
    }

    /// A single-breakpoint map: the same cap at every CCT.
    pub fn flat(max_lux: f64) -> Self {
        Self {
            entries: vec![(DEFAULT_MAX_TEMP, max_lux)],
        }
    }

    /// Maximum achievable lux at the given CCT.
    ///
    /// Clamps to the first/last breakpoint value outside the table range;
    /// an exact breakpoint match returns that value with no interpolation
    /// artifact.
    pub fn interpolate(&self, cct: f64) -> f64 {
        let first = self.entries[0];
        let last = self.entries[self.entries.len() - 1];
        if cct <= f64::from(first.0) {
            return first.1;
        }
        if cct >= f64::from(last.0) {
            return last.1;
        }
        for pair in self.entries.windows(2) {
            let (k0, v0) = pair[0];
            let (k1, v1) = pair[1];
            if cct == f64::from(k1) {
                return v1;
            }
            if cct >= f64::from(k0) && cct <= f64::from(k1) {
                let t = (cct - f64::from(k0)) / (f64::from(k1) - f64::from(k0));
                return v0 + (v1 - v0) * t;
            }
        }
        // Unreachable given the clamp checks above; keep the safe edge
        last.1
    }

    /// Invert a lux target into a device intensity on the 0-1000 scale.
    ///
    /// The fraction `target / max_lux_at_cct` is clamped to [0,1] before
    /// scaling, so a target beyond the rig's cap requests full output.
    pub fn intensity_for_lux(&self, cct: f64, lux_target: f64) -> u32 {
        let cap = self.interpolate(cct);
        if cap <= 0.0 {
            return 0;
        }
        let fraction = (lux_target / cap).clamp(0.0, 1.0);
        (fraction * f64::from(MAX_DEVICE_INTENSITY)).round() as u32
    }
}

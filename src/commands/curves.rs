//! Implementation of the `curves` subcommand: list the curve registry.

use crate::curve::{CurveFamily, CurveType};

/// Print the available curve models grouped by family.
pub fn handle_curves() {
    log_version!();

    log_block_start!("Time-fraction curves (shaped by day progress)");
    for curve in family(CurveFamily::TimeFraction) {
        log_indented!("{:<20} {}", curve.name(), curve.description());
    }

    log_block_start!("Solar-altitude curves (shaped by sun geometry)");
    for curve in family(CurveFamily::SolarAltitude) {
        log_indented!("{:<20} {}", curve.name(), curve.description());
    }

    log_end!();
}

fn family(family: CurveFamily) -> impl Iterator<Item = CurveType> {
    CurveType::ALL
        .into_iter()
        .filter(move |curve| curve.family() == family)
}

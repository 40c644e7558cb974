use log::info;

use super::stability::sliding_tsi;
use crate::data::model::PitchRecord;

/// Pitch angle of the straight-up scan.
pub const ZENITH_ANGLE: i32 = 90;

/// Positions of the zenith records, in record order.
pub fn zenith_indices(records: &[PitchRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.pitch_angle == ZENITH_ANGLE)
        .map(|(i, _)| i)
        .collect()
}

/// TSI across the whole zenith subsequence, ignoring loop boundaries.
///
/// Each interior zenith record gets `zenith_tsi`, which takes precedence
/// over any `loop_tsi` already set on it. Returns the computed values.
pub fn apply_zenith_tsi(records: &mut [PitchRecord]) -> Vec<f64> {
    let indices = zenith_indices(records);
    let ci: Vec<f64> = indices.iter().map(|&i| records[i].ci()).collect();
    let tsi = sliding_tsi(&ci);

    for (&idx, &value) in indices.iter().skip(1).zip(&tsi) {
        records[idx].zenith_tsi = Some(value);
    }

    info!(
        "Zenith pass: {} records at {ZENITH_ANGLE}°, {} TSI values",
        indices.len(),
        tsi.len()
    );
    tsi
}

use log::info;

use super::stability::{sliding_tsi, swing};
use crate::data::model::{LoopMeasure, PitchRecord};
use crate::error::{ReduceError, Result};

/// Compute TSI and SP for one loop window, writing each TSI value into the
/// middle record of its triple.
fn measure_loop(loop_num: usize, start: usize, window: &mut [PitchRecord]) -> LoopMeasure {
    let ci: Vec<f64> = window.iter().map(PitchRecord::ci).collect();
    let tsi_values = sliding_tsi(&ci);

    for (record, &tsi) in window.iter_mut().skip(1).zip(&tsi_values) {
        record.loop_tsi = Some(tsi);
    }

    LoopMeasure {
        loop_num,
        records: start..start + window.len(),
        tsi_values,
        sp: swing(&ci),
    }
}

/// Split records into consecutive loops of `angle_num` and measure each.
///
/// The record count must be an exact multiple of `angle_num`; a trailing
/// partial loop aborts the run.
pub fn aggregate_loops(records: &mut [PitchRecord], angle_num: usize) -> Result<Vec<LoopMeasure>> {
    if angle_num == 0 {
        return Err(ReduceError::InvalidAngleNum(angle_num));
    }
    if records.len() % angle_num != 0 {
        return Err(ReduceError::LoopSizeMismatch {
            records: records.len(),
            angle_num,
        });
    }

    let loops: Vec<LoopMeasure> = records
        .chunks_mut(angle_num)
        .enumerate()
        .map(|(i, window)| measure_loop(i + 1, i * angle_num, window))
        .collect();

    info!("Measured {} loops of {angle_num} angles", loops.len());
    Ok(loops)
}

use log::{info, warn};

use crate::analysis::loops::aggregate_loops;
use crate::analysis::zenith::apply_zenith_tsi;
use crate::config::Config;
use crate::data::calibration::{read_calibration, resolve_channels};
use crate::data::collector::collect_pitch_records;
use crate::data::field::Substitutions;
use crate::data::model::Reduction;
use crate::error::Result;
use crate::output;

/// Run the reduction: resolve channels, collect pitch scans, measure loops,
/// then overlay the zenith TSI. Any fatal error aborts the whole run.
pub fn run(config: &Config) -> Result<Reduction> {
    config.validate()?;
    let mut subs = Substitutions::new();

    let calibration = read_calibration(&config.cali_path)?;
    let channels = resolve_channels(&calibration, &mut subs)?;
    info!(
        "Calibration {}: low channel {}, high channel {}",
        config.cali_path.display(),
        channels.low,
        channels.high
    );

    let mut records = collect_pitch_records(&config.spectrum_path, channels, &mut subs)?;
    let loops = aggregate_loops(&mut records, config.angle_num)?;
    apply_zenith_tsi(&mut records);

    if !subs.is_empty() {
        warn!("{} fields could not be parsed and were read as 0", subs.len());
    }

    Ok(Reduction {
        channels,
        records,
        loops,
        substitutions: subs.into_issues(),
    })
}

/// [`run`], then write the result document (and CSV when configured).
/// Nothing is written unless the reduction succeeds.
pub fn run_and_write(config: &Config) -> Result<Reduction> {
    let reduction = run(config)?;

    output::write_json(&reduction, &config.output_path)?;
    info!("Wrote {} loops to {}", reduction.loops.len(), config.output_path.display());

    if let Some(csv_path) = &config.csv_path {
        output::write_csv(&reduction, csv_path)?;
        info!("Wrote {} records to {}", reduction.len(), csv_path.display());
    }
    Ok(reduction)
}

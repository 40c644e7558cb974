use std::path::Path;

use log::debug;

use super::field::{Substitutions, parse_field};
use super::model::ChannelIndexPair;
use crate::error::{ReduceError, Result};

/// Detector channel count the calibration table is sized for.
pub const MAX_CHANNELS: usize = 2048;

/// Target wavelength of the low (numerator) signal, nm.
pub const LOW_WAVELENGTH_NM: f64 = 330.0;

/// Target wavelength of the high (denominator) signal, nm.
pub const HIGH_WAVELENGTH_NM: f64 = 390.0;

/// Read a text file whole, trim it, and split it into lines.
pub fn read_lines(text: &str) -> Vec<String> {
    text.trim().split('\n').map(str::to_string).collect()
}

/// Read the calibration file: one wavelength per line.
pub fn read_calibration(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| ReduceError::CalibrationRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_lines(&text))
}

/// Parse the calibration lines into a wavelength table.
///
/// Unparsable entries are substituted with `0.0`. The resulting gap can pull
/// a threshold match forward or backward; it is logged, not repaired.
pub fn parse_table(lines: &[String], subs: &mut Substitutions) -> Result<Vec<f64>> {
    if lines.len() > MAX_CHANNELS {
        return Err(ReduceError::CalibrationTooLarge {
            found: lines.len(),
            max: MAX_CHANNELS,
        });
    }
    Ok(lines
        .iter()
        .enumerate()
        .map(|(i, line)| subs.take(parse_field(&format!("calibration[{i}]"), line)))
        .collect())
}

/// First channel whose wavelength reaches `target`, or `0` if none does.
pub fn first_at_or_above(table: &[f64], target: f64) -> usize {
    table.iter().position(|&w| w - target >= 0.0).unwrap_or(0)
}

/// Map the calibration table onto the two signal channels.
pub fn resolve_channels(lines: &[String], subs: &mut Substitutions) -> Result<ChannelIndexPair> {
    let table = parse_table(lines, subs)?;
    let channels = ChannelIndexPair {
        low: first_at_or_above(&table, LOW_WAVELENGTH_NM),
        high: first_at_or_above(&table, HIGH_WAVELENGTH_NM),
    };
    debug!(
        "{} calibration entries → low channel {}, high channel {}",
        table.len(),
        channels.low,
        channels.high
    );
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn picks_first_channels_at_thresholds() {
        let mut subs = Substitutions::new();
        let pair = resolve_channels(&lines(&["300", "320", "335", "400"]), &mut subs).unwrap();
        assert_eq!(pair, ChannelIndexPair { low: 2, high: 3 });
        assert!(subs.is_empty());
    }

    #[test]
    fn exact_threshold_qualifies() {
        let mut subs = Substitutions::new();
        let pair = resolve_channels(&lines(&["329.9", "330.0", "389.99", "390"]), &mut subs).unwrap();
        assert_eq!(pair, ChannelIndexPair { low: 1, high: 3 });
    }

    #[test]
    fn no_qualifying_channel_defaults_to_zero() {
        let mut subs = Substitutions::new();
        let pair = resolve_channels(&lines(&["200", "250", "300"]), &mut subs).unwrap();
        assert_eq!(pair, ChannelIndexPair { low: 0, high: 0 });
    }

    #[test]
    fn unparsable_entry_becomes_zero_and_is_recorded() {
        let mut subs = Substitutions::new();
        let pair = resolve_channels(&lines(&["331", "abc", "395"]), &mut subs).unwrap();
        assert_eq!(pair, ChannelIndexPair { low: 0, high: 2 });
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.issues()[0].raw, "abc");
    }

    #[test]
    fn oversized_table_is_fatal() {
        let big: Vec<String> = (0..=MAX_CHANNELS).map(|i| i.to_string()).collect();
        let mut subs = Substitutions::new();
        let err = resolve_channels(&big, &mut subs).unwrap_err();
        assert!(matches!(err, ReduceError::CalibrationTooLarge { found, .. } if found == MAX_CHANNELS + 1));
    }

    #[test]
    fn read_lines_trims_outer_whitespace() {
        assert_eq!(read_lines("\n1\n2\n\n"), vec!["1", "2"]);
    }
}

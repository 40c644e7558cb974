use super::field::{Substitutions, parse_field};
use super::model::{ChannelIndexPair, SpectrumSample};
use crate::error::{ReduceError, Result};

// ---------------------------------------------------------------------------
// Scan file format
// ---------------------------------------------------------------------------
//
//   line 0..3        header
//   line k + 3       signal of detector channel k
//   line 2056        acquisition time, H:M:S (seconds may be fractional)

/// Header lines preceding the per-channel signal block.
pub const HEADER_LINES: usize = 3;

/// Fixed 0-based line holding the acquisition timestamp.
pub const TIMESTAMP_LINE: usize = 2056;

fn line_at(lines: &[String], index: usize) -> Result<&str> {
    lines
        .get(index)
        .map(|l| l.trim())
        .ok_or(ReduceError::ScanTooShort {
            lines: lines.len(),
            needed: index,
        })
}

/// Convert an `H:M:S` timestamp to seconds since midnight.
///
/// Every component that is missing or not numeric contributes `0` and is
/// recorded in `subs`.
pub fn parse_timestamp(raw: &str, subs: &mut Substitutions) -> f64 {
    let mut parts = raw.trim().split(':');
    let mut next = |name: &str| -> f64 {
        let part = parts.next().unwrap_or("");
        subs.take(parse_field(name, part))
    };
    let h = next("hours");
    let m = next("minutes");
    let s = next("seconds");
    h * 3600.0 + m * 60.0 + s
}

/// Pull the two channel signals and the timestamp out of one scan.
pub fn extract_sample(
    lines: &[String],
    channels: ChannelIndexPair,
    subs: &mut Substitutions,
) -> Result<SpectrumSample> {
    let low_raw = line_at(lines, channels.low + HEADER_LINES)?;
    let high_raw = line_at(lines, channels.high + HEADER_LINES)?;
    let time_raw = line_at(lines, TIMESTAMP_LINE)?;

    let signal_low = subs.take(parse_field("signal_low", low_raw));
    let signal_high = subs.take(parse_field("signal_high", high_raw));
    let time_seconds = parse_timestamp(time_raw, subs);

    Ok(SpectrumSample::new(signal_low, signal_high, time_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a scan body with the given channel signals and timestamp.
    fn scan(signals: &[(usize, &str)], time: &str) -> Vec<String> {
        let mut lines: Vec<String> = (0..=TIMESTAMP_LINE).map(|_| "0".to_string()).collect();
        for &(ch, v) in signals {
            lines[ch + HEADER_LINES] = v.to_string();
        }
        lines[TIMESTAMP_LINE] = time.to_string();
        lines
    }

    #[test]
    fn ratio_of_channel_signals() {
        let lines = scan(&[(4, "10"), (9, "5")], "00:00:00");
        let mut subs = Substitutions::new();
        let s = extract_sample(&lines, ChannelIndexPair { low: 4, high: 9 }, &mut subs).unwrap();
        assert_eq!(s.signal_low, 10.0);
        assert_eq!(s.signal_high, 5.0);
        assert_eq!(s.ci, 2.0);
        assert!(subs.is_empty());
    }

    #[test]
    fn timestamp_to_seconds() {
        let mut subs = Substitutions::new();
        assert_eq!(parse_timestamp("01:02:03", &mut subs), 3723.0);
        assert_eq!(parse_timestamp(" 10:00:01.5 ", &mut subs), 36001.5);
        assert!(subs.is_empty());
    }

    #[test]
    fn bad_timestamp_parts_count_as_zero() {
        let mut subs = Substitutions::new();
        assert_eq!(parse_timestamp("01:xx", &mut subs), 3600.0);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn bad_signal_is_substituted() {
        let lines = scan(&[(0, "n/a"), (1, "4")], "00:00:10");
        let mut subs = Substitutions::new();
        let s = extract_sample(&lines, ChannelIndexPair { low: 0, high: 1 }, &mut subs).unwrap();
        assert_eq!(s.signal_low, 0.0);
        assert_eq!(s.ci, 0.0);
        assert_eq!(s.time_seconds, 10.0);
        assert_eq!(subs.issues()[0].field, "signal_low");
    }

    #[test]
    fn truncated_scan_is_fatal() {
        let lines: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        let mut subs = Substitutions::new();
        let err = extract_sample(&lines, ChannelIndexPair { low: 1, high: 2 }, &mut subs).unwrap_err();
        assert!(matches!(err, ReduceError::ScanTooShort { lines: 100, needed: TIMESTAMP_LINE }));
    }
}

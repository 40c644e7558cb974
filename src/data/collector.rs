use std::path::Path;

use log::{debug, info};

use super::calibration::read_lines;
use super::field::{Substitutions, parse_field};
use super::model::{ChannelIndexPair, PitchRecord};
use super::scan::extract_sample;
use crate::error::{ReduceError, Result};

/// Scan kind token that marks a pitch scan.
pub const PITCH_KIND: &str = "pitch";

// ---------------------------------------------------------------------------
// File-name convention: <prefix>_<sequence>_<kind>_<angle>.<ext>
// ---------------------------------------------------------------------------

/// Metadata carried by a scan file name.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanName {
    /// A pitch scan with its angle and sequence number.
    Pitch { pitch_angle: i32, sequence_num: i32 },
    /// Any other kind (e.g. `horizontal`); not part of the reduction.
    Other { kind: String },
}

impl ScanName {
    /// Split a file name on `_` and classify it.
    ///
    /// Fewer than three tokens, or a pitch scan without an angle token, is a
    /// fatal naming violation. Unparsable numbers become `0`.
    pub fn parse(name: &str, subs: &mut Substitutions) -> Result<Self> {
        let tokens: Vec<&str> = name.split('_').collect();
        let malformed = || ReduceError::MalformedFileName {
            name: name.to_string(),
        };

        let kind = *tokens.get(2).ok_or_else(malformed)?;
        if kind != PITCH_KIND {
            return Ok(ScanName::Other {
                kind: kind.to_string(),
            });
        }

        let angle_token = tokens.get(3).ok_or_else(malformed)?;
        let angle = angle_token.split('.').next().unwrap_or("");

        Ok(ScanName::Pitch {
            pitch_angle: subs.take(parse_field(&format!("{name}: angle"), angle)),
            sequence_num: subs.take(parse_field(&format!("{name}: sequence"), tokens[1])),
        })
    }
}

// ---------------------------------------------------------------------------
// Directory scan
// ---------------------------------------------------------------------------

/// List the regular files of `dir`, ordered by file name.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let dir_err = |source: std::io::Error| ReduceError::ScanDirRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        if !entry.file_type().map_err(dir_err)?.is_file() {
            debug!("skipping non-file entry {:?}", entry.path());
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Read every pitch scan in `dir` into a [`PitchRecord`], in file-name order.
pub fn collect_pitch_records(
    dir: &Path,
    channels: ChannelIndexPair,
    subs: &mut Substitutions,
) -> Result<Vec<PitchRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for name in list_files(dir)? {
        let (pitch_angle, sequence_num) = match ScanName::parse(&name, subs)? {
            ScanName::Pitch {
                pitch_angle,
                sequence_num,
            } => (pitch_angle, sequence_num),
            ScanName::Other { kind } => {
                debug!("{name}: {kind} scan, skipped");
                skipped += 1;
                continue;
            }
        };

        let path = dir.join(&name);
        let text = std::fs::read_to_string(&path)
            .map_err(|source| ReduceError::ScanRead { path: path.clone(), source })?;
        let spectrum = extract_sample(&read_lines(&text), channels, subs)?;

        debug!(
            "{name}: angle {pitch_angle}, seq {sequence_num}, ci {:.6}",
            spectrum.ci
        );
        records.push(PitchRecord::new(name, pitch_angle, sequence_num, spectrum));
    }

    info!(
        "Collected {} pitch scans from {} ({} other scans skipped)",
        records.len(),
        dir.display(),
        skipped
    );
    Ok(records)
}

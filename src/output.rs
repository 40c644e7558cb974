use std::path::Path;

use serde::Serialize;

use crate::data::model::{LoopMeasure, PitchRecord, Reduction};
use crate::error::{ReduceError, Result};

// ---------------------------------------------------------------------------
// Serializable views over a Reduction
// ---------------------------------------------------------------------------

/// One record as it appears in the result document and the CSV export.
#[derive(Debug, Serialize)]
pub struct RecordRow<'a> {
    pub file_name: &'a str,
    pub pitch_angle: i32,
    pub sequence_num: i32,
    pub signal_low: f64,
    pub signal_high: f64,
    pub time_seconds: f64,
    pub ci: f64,
    pub tsi: f64,
    pub loop_tsi: Option<f64>,
    pub zenith_tsi: Option<f64>,
}

impl<'a> From<&'a PitchRecord> for RecordRow<'a> {
    fn from(r: &'a PitchRecord) -> Self {
        RecordRow {
            file_name: &r.file_name,
            pitch_angle: r.pitch_angle,
            sequence_num: r.sequence_num,
            signal_low: r.spectrum.signal_low,
            signal_high: r.spectrum.signal_high,
            time_seconds: r.spectrum.time_seconds,
            ci: r.spectrum.ci,
            tsi: r.tsi(),
            loop_tsi: r.loop_tsi,
            zenith_tsi: r.zenith_tsi,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoopDocument<'a> {
    pub loop_num: usize,
    pub records: Vec<RecordRow<'a>>,
    pub tsi_values: &'a [f64],
    pub sp: f64,
}

impl<'a> LoopDocument<'a> {
    fn new(reduction: &'a Reduction, lm: &'a LoopMeasure) -> Self {
        LoopDocument {
            loop_num: lm.loop_num,
            records: reduction.loop_records(lm).iter().map(RecordRow::from).collect(),
            tsi_values: &lm.tsi_values,
            sp: lm.sp,
        }
    }
}

/// Flat CSV row: the record plus the loop it belongs to.
// csv rejects `#[serde(flatten)]`, hence the repeated columns.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    loop_num: usize,
    file_name: &'a str,
    pitch_angle: i32,
    sequence_num: i32,
    signal_low: f64,
    signal_high: f64,
    time_seconds: f64,
    ci: f64,
    tsi: f64,
    loop_tsi: Option<f64>,
    zenith_tsi: Option<f64>,
}

impl<'a> CsvRow<'a> {
    fn new(loop_num: usize, r: RecordRow<'a>) -> Self {
        CsvRow {
            loop_num,
            file_name: r.file_name,
            pitch_angle: r.pitch_angle,
            sequence_num: r.sequence_num,
            signal_low: r.signal_low,
            signal_high: r.signal_high,
            time_seconds: r.time_seconds,
            ci: r.ci,
            tsi: r.tsi,
            loop_tsi: r.loop_tsi,
            zenith_tsi: r.zenith_tsi,
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Tab-indented JSON, one object per loop.
pub fn to_json(reduction: &Reduction) -> Result<String> {
    let document: Vec<LoopDocument> = reduction
        .loops
        .iter()
        .map(|lm| LoopDocument::new(reduction, lm))
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_json(reduction: &Reduction, path: &Path) -> Result<()> {
    let text = to_json(reduction)?;
    std::fs::write(path, text).map_err(|source| ReduceError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_csv(reduction: &Reduction, path: &Path) -> Result<()> {
    let csv_err = |source: csv::Error| ReduceError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for lm in &reduction.loops {
        for record in reduction.loop_records(lm) {
            writer
                .serialize(CsvRow::new(lm.loop_num, RecordRow::from(record)))
                .map_err(csv_err)?;
        }
    }
    writer.flush().map_err(|source| ReduceError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ChannelIndexPair, SpectrumSample};
    use serde_json::Value as JsonValue;

    fn reduction() -> Reduction {
        let mut records: Vec<PitchRecord> = [(0, 1.0), (90, 4.0), (45, 1.0)]
            .iter()
            .enumerate()
            .map(|(i, &(angle, low))| {
                PitchRecord::new(format!("s_{i}_pitch_{angle}.txt"), angle, i as i32, SpectrumSample::new(low, 2.0, 60.0))
            })
            .collect();
        records[1].loop_tsi = Some(1.5);
        Reduction {
            channels: ChannelIndexPair { low: 2, high: 3 },
            records,
            loops: vec![LoopMeasure {
                loop_num: 1,
                records: 0..3,
                tsi_values: vec![1.5],
                sp: 1.5,
            }],
            substitutions: Vec::new(),
        }
    }

    #[test]
    fn json_document_layout() {
        let text = to_json(&reduction()).unwrap();
        assert!(text.contains("\n\t{"));

        let doc: JsonValue = serde_json::from_str(&text).unwrap();
        let loop0 = &doc[0];
        assert_eq!(loop0["loop_num"], 1);
        assert_eq!(loop0["sp"], 1.5);
        assert_eq!(loop0["tsi_values"][0], 1.5);
        assert_eq!(loop0["records"].as_array().unwrap().len(), 3);

        let mid = &loop0["records"][1];
        assert_eq!(mid["file_name"], "s_1_pitch_90.txt");
        assert_eq!(mid["ci"], 2.0);
        assert_eq!(mid["tsi"], 1.5);
        assert!(mid["zenith_tsi"].is_null());
        assert_eq!(loop0["records"][0]["tsi"], 0.0);
    }

    #[test]
    fn non_finite_values_become_null() {
        let mut r = reduction();
        r.records[0].spectrum = SpectrumSample::new(1.0, 0.0, 0.0);
        let doc: JsonValue = serde_json::from_str(&to_json(&r).unwrap()).unwrap();
        assert!(doc[0]["records"][0]["ci"].is_null());
    }

    #[test]
    fn csv_has_one_row_per_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("records.csv");
        write_csv(&reduction(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "loop_num");
        assert!(headers.iter().any(|h| h == "zenith_tsi"));
        assert_eq!(reader.records().count(), 3);
    }
}

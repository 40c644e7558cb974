use std::ops::Range;

use serde::Serialize;

use crate::error::FieldError;

// ---------------------------------------------------------------------------
// ChannelIndexPair – detector channels nearest the two target wavelengths
// ---------------------------------------------------------------------------

/// Channel indices of the low (330 nm) and high (390 nm) signals.
///
/// An index stays `0` when no channel reaches its threshold. Callers get the
/// first channel in that case rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelIndexPair {
    pub low: usize,
    pub high: usize,
}

// ---------------------------------------------------------------------------
// SpectrumSample – the values pulled out of one scan file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumSample {
    pub signal_low: f64,
    pub signal_high: f64,
    /// Seconds since midnight.
    pub time_seconds: f64,
    /// `signal_low / signal_high`, inf/NaN passed through untouched.
    pub ci: f64,
}

impl SpectrumSample {
    pub fn new(signal_low: f64, signal_high: f64, time_seconds: f64) -> Self {
        SpectrumSample {
            signal_low,
            signal_high,
            time_seconds,
            ci: signal_low / signal_high,
        }
    }
}

// ---------------------------------------------------------------------------
// PitchRecord – one pitch scan
// ---------------------------------------------------------------------------

/// A single pitch scan together with the TSI values the two passes assign.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchRecord {
    pub file_name: String,
    pub pitch_angle: i32,
    pub sequence_num: i32,
    pub spectrum: SpectrumSample,
    /// Written by the per-loop pass for interior loop positions.
    pub loop_tsi: Option<f64>,
    /// Written by the zenith pass for interior zenith positions.
    pub zenith_tsi: Option<f64>,
}

impl PitchRecord {
    pub fn new(file_name: String, pitch_angle: i32, sequence_num: i32, spectrum: SpectrumSample) -> Self {
        PitchRecord {
            file_name,
            pitch_angle,
            sequence_num,
            spectrum,
            loop_tsi: None,
            zenith_tsi: None,
        }
    }

    pub fn ci(&self) -> f64 {
        self.spectrum.ci
    }

    /// Effective TSI: the zenith pass runs last, so its value wins.
    pub fn tsi(&self) -> f64 {
        self.zenith_tsi.or(self.loop_tsi).unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// LoopMeasure – one fixed-size measurement cycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LoopMeasure {
    /// 1-based.
    pub loop_num: usize,
    /// Positions of this loop's records in [`Reduction::records`].
    pub records: Range<usize>,
    pub tsi_values: Vec<f64>,
    pub sp: f64,
}

// ---------------------------------------------------------------------------
// Reduction – the complete result of one run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Reduction {
    pub channels: ChannelIndexPair,
    pub records: Vec<PitchRecord>,
    pub loops: Vec<LoopMeasure>,
    /// Fields that failed to parse and were replaced by zero.
    pub substitutions: Vec<FieldError>,
}

impl Reduction {
    /// Records belonging to one loop.
    pub fn loop_records(&self, lm: &LoopMeasure) -> &[PitchRecord] {
        &self.records[lm.records.clone()]
    }

    /// Number of pitch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

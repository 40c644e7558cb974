use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions. Any of these aborts the whole reduction run.
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("cannot read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("angle_num must be a positive integer, got {0}")]
    InvalidAngleNum(usize),

    #[error("cannot read calibration file {path}")]
    CalibrationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("calibration table has {found} entries, at most {max} channels are supported")]
    CalibrationTooLarge { found: usize, max: usize },

    #[error("cannot list scan directory {path}")]
    ScanDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read scan file {path}")]
    ScanRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan file has {lines} lines, line {needed} is required")]
    ScanTooShort { lines: usize, needed: usize },

    #[error("file name '{name}' does not follow <prefix>_<sequence>_<kind>_<angle>.<ext>")]
    MalformedFileName { name: String },

    #[error("{records} pitch records is not a multiple of angle_num {angle_num}")]
    LoopSizeMismatch { records: usize, angle_num: usize },

    #[error("cannot write {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing result document")]
    Serialize(#[from] serde_json::Error),

    #[error("writing CSV {path}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReduceError>;

/// A numeric field that could not be parsed. Never fatal on its own; the
/// caller decides whether to substitute a default.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: cannot parse '{raw}' ({reason})")]
pub struct FieldError {
    pub field: String,
    pub raw: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, raw: impl Into<String>, reason: impl ToString) -> Self {
        FieldError {
            field: field.into(),
            raw: raw.into(),
            reason: reason.to_string(),
        }
    }
}

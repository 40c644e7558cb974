use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReduceError, Result};

/// Config file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Result document written when `output_path` is absent.
pub const DEFAULT_OUTPUT_PATH: &str = "result.json";

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// Run configuration, passed explicitly into the pipeline.
///
/// ```json
/// {
///   "spectrum_path": "data/scans",
///   "cali_path": "data/cali.txt",
///   "angle_num": 9,
///   "output_path": "result.json",
///   "csv_path": "records.csv"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Directory holding the scan files.
    pub spectrum_path: PathBuf,
    /// Calibration table, one wavelength per line.
    pub cali_path: PathBuf,
    /// Scans per measurement loop.
    pub angle_num: usize,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Optional flat per-record CSV export.
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
}

impl Config {
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        let config: Config = serde_json::from_str(text).map_err(|source| ReduceError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ReduceError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.angle_num == 0 {
            return Err(ReduceError::InvalidAngleNum(self.angle_num));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let text = r#"{"spectrum_path": "scans", "cali_path": "cali.txt", "angle_num": 9}"#;
        let cfg = Config::from_json(text, Path::new("config.json")).unwrap();
        assert_eq!(cfg.spectrum_path, PathBuf::from("scans"));
        assert_eq!(cfg.angle_num, 9);
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.csv_path, None);
    }

    #[test]
    fn missing_key_is_malformed() {
        let text = r#"{"spectrum_path": "scans", "angle_num": 9}"#;
        assert!(matches!(
            Config::from_json(text, Path::new("c.json")),
            Err(ReduceError::ConfigParse { .. })
        ));
    }

    #[test]
    fn negative_or_zero_angle_num_rejected() {
        let neg = r#"{"spectrum_path": "s", "cali_path": "c", "angle_num": -3}"#;
        assert!(matches!(
            Config::from_json(neg, Path::new("c.json")),
            Err(ReduceError::ConfigParse { .. })
        ));
        let zero = r#"{"spectrum_path": "s", "cali_path": "c", "angle_num": 0}"#;
        assert!(matches!(
            Config::from_json(zero, Path::new("c.json")),
            Err(ReduceError::InvalidAngleNum(0))
        ));
    }

    #[test]
    fn unreadable_file_is_reported() {
        let err = Config::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ReduceError::ConfigRead { .. }));
    }
}

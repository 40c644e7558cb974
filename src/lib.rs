//! Reduction of pitch-scan spectrometer batches into CI stability indices.
//!
//! A run resolves the 330/390 nm detector channels from a calibration table,
//! extracts their signals from every pitch scan, groups the scans into
//! fixed-size measurement loops and computes per-loop TSI and SP, then
//! overlays a zenith-only TSI across all 90° scans.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod pipeline;

pub use config::Config;
pub use data::model::{ChannelIndexPair, LoopMeasure, PitchRecord, Reduction, SpectrumSample};
pub use error::{FieldError, ReduceError};

/// Data layer: core types, file parsing, and pitch-scan collection.
///
/// Architecture:
/// ```text
///   cali.txt                  <prefix>_<seq>_<kind>_<angle>.txt
///      │                                 │
///      ▼                                 ▼
///   ┌─────────────┐  ChannelIndexPair ┌───────────┐
///   │ calibration  │ ────────────────▶ │ collector  │  name → ScanName
///   └─────────────┘                    └───────────┘
///                                          │ per pitch file
///                                          ▼
///                                      ┌────────┐
///                                      │  scan   │  lines → SpectrumSample
///                                      └────────┘
///                                          │
///                                          ▼
///                                   Vec<PitchRecord>
/// ```
///
/// Numeric fields go through `field`, which reports failures as values so
/// the caller can substitute zero and keep a record of it.

pub mod calibration;
pub mod collector;
pub mod field;
pub mod model;
pub mod scan;

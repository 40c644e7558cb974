/// Analysis layer: CI stability indices over collected pitch records.
///
/// Architecture:
/// ```text
///   Vec<PitchRecord>
///        │
///        ▼
///   ┌──────────┐
///   │  loops    │  fixed-size windows → LoopMeasure, loop_tsi written back
///   └──────────┘
///        │  per window
///        ▼
///   ┌────────────┐
///   │ stability   │  sliding TSI, SP (peak-to-peak)
///   └────────────┘
///        ▲
///        │  whole 90° subsequence
///   ┌──────────┐
///   │  zenith   │  zenith_tsi written back, overrides loop_tsi
///   └──────────┘
/// ```

pub mod loops;
pub mod stability;
pub mod zenith;

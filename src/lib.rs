//! Deterministic AI-generated voice detection.
//!
//! Decodes a short speech recording, extracts spectral and temporal
//! descriptors, computes three independent AI-likelihood scores, and fuses
//! them into a calibrated probability with a textual rationale. No model is
//! trained or loaded; the classifier is a fixed, hand-weighted combination
//! of signal-processing statistics, so identical input bytes always produce
//! identical verdicts.

/// DSP primitives: decoding, spectral transforms, statistics.
pub mod analysis;
/// Scoring pipeline and boundary API.
pub mod detector;
/// Tracing subscriber setup.
pub mod logging;

pub use analysis::audio::{AudioFormat, UnsupportedFormat, Waveform};
pub use detector::{Classification, Detection, DetectorConfig, Label, detect_voice};

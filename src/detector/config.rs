//! Explicit pipeline configuration. There is no model, scaler, or any other
//! per-instance state; every scoring function takes this by reference.

use crate::analysis::audio::ANALYSIS_SAMPLE_RATE;

/// Fixed ensemble weights applied by the fuser.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionWeights {
    pub artifact: f32,
    pub temporal: f32,
    pub spectral: f32,
    pub feature_variance: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            artifact: 0.35,
            temporal: 0.25,
            spectral: 0.25,
            feature_variance: 0.15,
        }
    }
}

/// Parameters of the scoring pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Sample rate audio is resampled to before analysis.
    pub sample_rate: u32,
    /// Number of cepstral coefficients per analysis frame.
    pub cepstral_coefficients: usize,
    /// Autocorrelation lag window for the periodicity indicator, seconds.
    pub periodicity_lag_seconds: f32,
    pub weights: FusionWeights,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_rate: ANALYSIS_SAMPLE_RATE,
            cepstral_coefficients: 13,
            periodicity_lag_seconds: 0.05,
            weights: FusionWeights::default(),
        }
    }
}

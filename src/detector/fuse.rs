//! Fixed-weight fusion of the scorer outputs into one probability.

use crate::analysis::stats::{EPSILON, mean, std_dev};
use crate::detector::config::FusionWeights;
use crate::detector::features::DescriptorVector;

/// Calibration slope of the logistic squash. Not a learned parameter:
/// recenters the decision boundary at 0.5 and sharpens separation near it.
const LOGISTIC_SLOPE: f32 = 8.0;

/// Low overall descriptor variance reads as synthetic. Returns [0, 1].
pub fn feature_variance_indicator(descriptor: &DescriptorVector) -> f32 {
    let values = descriptor.as_slice();
    if values.is_empty() {
        return 0.0;
    }
    let magnitudes: Vec<f32> = values.iter().map(|v| v.abs()).collect();
    let cv = std_dev(values) / (mean(&magnitudes) + EPSILON);
    (1.0 - cv / 5.0).clamp(0.0, 1.0)
}

/// Weighted ensemble of the three scorers plus the feature-variance signal,
/// squashed through a logistic centered at 0.5. Output is in [0, 1].
pub fn fuse(
    descriptor: &DescriptorVector,
    artifact: f32,
    temporal: f32,
    spectral: f32,
    weights: &FusionWeights,
) -> f32 {
    let feature_variance = feature_variance_indicator(descriptor);
    let weighted = weights.artifact * artifact
        + weights.temporal * temporal
        + weights.spectral * spectral
        + weights.feature_variance * feature_variance;
    let squashed = 1.0 / (1.0 + (-(weighted - 0.5) * LOGISTIC_SLOPE).exp());
    squashed.clamp(0.0, 1.0)
}

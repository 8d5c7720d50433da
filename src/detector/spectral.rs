//! Synthetic spectral-signature likelihood: centroid stability, flatness,
//! and harmonic dominance.

use crate::analysis::audio::Waveform;
use crate::analysis::frequency_domain::hpss::harmonic_energy_ratio;
use crate::analysis::frequency_domain::stft::{
    centroid_series, flatness_series, magnitude_spectrogram,
};
use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
use crate::analysis::stats::{EPSILON, mean, std_dev};

/// Score in [0, 1]; higher means a more synthetic spectral signature.
/// Arithmetic mean of three indicators.
pub fn spectral_score(wave: &Waveform) -> f32 {
    let spec = magnitude_spectrogram(wave.samples(), STFT_FRAME_SIZE, STFT_HOP_SIZE);
    let mut indicators = Vec::with_capacity(3);

    // A centroid that barely moves is a stability tell.
    let centroid = centroid_series(&spec, wave.sample_rate());
    let cv = std_dev(&centroid) / (mean(&centroid) + EPSILON);
    indicators.push(1.0 - (cv / 0.3).min(1.0));

    // Already in [0, 1]; taken as-is.
    indicators.push(mean(&flatness_series(&spec)));

    indicators.push((harmonic_energy_ratio(&spec) / 0.8).min(1.0));

    mean(&indicators).clamp(0.0, 1.0)
}

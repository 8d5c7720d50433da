//! Digital-artifact likelihood: formant regularity, spectral smoothness,
//! noise-floor cleanliness, and vocoder periodicity.

use crate::analysis::audio::Waveform;
use crate::analysis::frequency_domain::mel::cepstral_matrix;
use crate::analysis::frequency_domain::stft::magnitude_spectrogram;
use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
use crate::analysis::stats::{EPSILON, mean, std_dev};
use crate::analysis::time_domain::short_lag_periodicity;
use crate::detector::config::DetectorConfig;

/// Score in [0, 1]; higher means more synthetic-sounding. Arithmetic mean
/// of four indicators.
pub fn artifact_score(wave: &Waveform, config: &DetectorConfig) -> f32 {
    let spec = magnitude_spectrogram(wave.samples(), STFT_FRAME_SIZE, STFT_HOP_SIZE);
    let mut indicators = Vec::with_capacity(4);

    // Spread of the per-coefficient temporal spreads; regular formants
    // keep every coefficient equally steady.
    let cepstra = cepstral_matrix(&spec, wave.sample_rate(), config.cepstral_coefficients);
    let per_coeff_std: Vec<f32> = (0..config.cepstral_coefficients)
        .map(|coeff| {
            let series: Vec<f32> = cepstra.iter().map(|frame| frame[coeff]).collect();
            std_dev(&series)
        })
        .collect();
    indicators.push((std_dev(&per_coeff_std) / 5.0).min(1.0));

    // Smoother spectra over time score higher.
    let smoothness = mean(&spec.per_bin_time_std());
    indicators.push(1.0 - (smoothness / 2000.0).min(1.0));

    // Peak-to-noise-floor ratio; an unnaturally clean floor scores higher.
    let floor = spec.magnitude_percentile(10.0);
    let peak = spec.magnitude_percentile(90.0);
    let snr_ratio = peak / (floor + EPSILON);
    indicators.push(((snr_ratio - 5.0) / 20.0).min(1.0));

    // Strong short-lag autocorrelation is a vocoder fingerprint.
    indicators.push(short_lag_periodicity(
        wave.samples(),
        wave.sample_rate(),
        config.periodicity_lag_seconds,
    ));

    mean(&indicators).clamp(0.0, 1.0)
}

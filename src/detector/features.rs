//! Fixed-layout descriptor vector summarizing a waveform.

use crate::analysis::audio::Waveform;
use crate::analysis::frequency_domain::chroma::{CHROMA_BINS, chroma_matrix};
use crate::analysis::frequency_domain::mel::cepstral_matrix;
use crate::analysis::frequency_domain::stft::{
    centroid_series, magnitude_spectrogram, rolloff_series,
};
use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
use crate::analysis::stats::{max_value, mean, min_value, std_dev};
use crate::analysis::time_domain::zero_crossing_rate_series;
use crate::detector::config::DetectorConfig;

/// Immutable descriptor with a fixed concatenation order:
/// cepstra (mean, std, min, max per coefficient), centroid (mean, std, min,
/// max), rolloff (mean, std), zero-crossing rate (mean, std), chroma
/// (mean, std per bin). 86 values with the default configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorVector(Vec<f32>);

impl DescriptorVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn extract_descriptor(wave: &Waveform, config: &DetectorConfig) -> DescriptorVector {
    let spec = magnitude_spectrogram(wave.samples(), STFT_FRAME_SIZE, STFT_HOP_SIZE);
    let mut values = Vec::with_capacity(config.cepstral_coefficients * 4 + 8 + CHROMA_BINS * 2);

    let cepstra = cepstral_matrix(&spec, wave.sample_rate(), config.cepstral_coefficients);
    let reducers: [fn(&[f32]) -> f32; 4] = [mean, std_dev, min_value, max_value];
    for reduce in reducers {
        for coeff in 0..config.cepstral_coefficients {
            let series: Vec<f32> = cepstra.iter().map(|frame| frame[coeff]).collect();
            values.push(reduce(&series));
        }
    }

    let centroid = centroid_series(&spec, wave.sample_rate());
    values.push(mean(&centroid));
    values.push(std_dev(&centroid));
    values.push(min_value(&centroid));
    values.push(max_value(&centroid));

    let rolloff = rolloff_series(&spec, wave.sample_rate());
    values.push(mean(&rolloff));
    values.push(std_dev(&rolloff));

    let zcr = zero_crossing_rate_series(wave.samples(), STFT_FRAME_SIZE, STFT_HOP_SIZE);
    values.push(mean(&zcr));
    values.push(std_dev(&zcr));

    let chroma = chroma_matrix(&spec, wave.sample_rate());
    for bin in 0..CHROMA_BINS {
        let series: Vec<f32> = chroma.iter().map(|frame| frame[bin]).collect();
        values.push(mean(&series));
    }
    for bin in 0..CHROMA_BINS {
        let series: Vec<f32> = chroma.iter().map(|frame| frame[bin]).collect();
        values.push(std_dev(&series));
    }

    DescriptorVector(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::audio::ANALYSIS_SAMPLE_RATE;

    fn sine_wave(seconds: f32) -> Waveform {
        let sr = ANALYSIS_SAMPLE_RATE;
        let samples: Vec<f32> = (0..(sr as f32 * seconds) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sr as f32).sin() * 0.5)
            .collect();
        Waveform::new(samples, sr)
    }

    #[test]
    fn default_descriptor_has_86_values() {
        let wave = sine_wave(1.0);
        let descriptor = extract_descriptor(&wave, &DetectorConfig::default());
        assert_eq!(descriptor.len(), 86);
        assert!(descriptor.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn descriptor_is_deterministic() {
        let wave = sine_wave(1.5);
        let config = DetectorConfig::default();
        let a = extract_descriptor(&wave, &config);
        let b = extract_descriptor(&wave, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn min_never_exceeds_max_for_each_cepstral_slot() {
        let wave = sine_wave(1.0);
        let config = DetectorConfig::default();
        let descriptor = extract_descriptor(&wave, &config);
        let n = config.cepstral_coefficients;
        let values = descriptor.as_slice();
        for coeff in 0..n {
            let min = values[2 * n + coeff];
            let max = values[3 * n + coeff];
            assert!(min <= max, "coeff {coeff}: min {min} max {max}");
        }
    }
}

//! Mel filterbank and cepstral coefficients.

use super::stft::Spectrogram;

const MEL_BANDS: usize = 40;
const MEL_F_MIN: f32 = 20.0;

/// Triangular mel filterbank with a DCT-II stage producing cepstra.
pub(crate) struct MelFilterBank {
    cepstra: usize,
    filters: Vec<Vec<(usize, f32)>>,
}

impl MelFilterBank {
    pub(crate) fn new(sample_rate: u32, fft_len: usize, bands: usize, cepstra: usize) -> Self {
        let nyquist = sample_rate.max(1) as f32 * 0.5;
        let edges = filter_edges(sample_rate, fft_len, bands, MEL_F_MIN, nyquist);
        let mut filters = Vec::with_capacity(bands);
        for m in 0..bands {
            let left = edges[m];
            let center = edges[m + 1];
            let right = edges[m + 2].max(center + 1);
            filters.push(triangle_weights(left, center, right));
        }
        Self { cepstra, filters }
    }

    /// Log mel energies followed by a truncated DCT-II.
    pub(crate) fn cepstra_from_power(&self, power: &[f32]) -> Vec<f32> {
        let log_energies: Vec<f32> = self
            .filters
            .iter()
            .map(|filter| {
                let mut sum = 0.0_f64;
                for &(bin, weight) in filter {
                    let p = power.get(bin).copied().unwrap_or(0.0).max(0.0) as f64;
                    sum += p * weight as f64;
                }
                (sum.max(1e-12)).ln() as f32
            })
            .collect();
        dct_ii(&log_energies, self.cepstra)
    }
}

/// Cepstral coefficients for every frame of a magnitude spectrogram.
pub(crate) fn cepstral_matrix(
    spec: &Spectrogram,
    sample_rate: u32,
    cepstra: usize,
) -> Vec<Vec<f32>> {
    let bank = MelFilterBank::new(sample_rate, spec.frame_size(), MEL_BANDS, cepstra);
    spec.frames()
        .iter()
        .map(|frame| {
            let power: Vec<f32> = frame.iter().map(|&m| m * m).collect();
            bank.cepstra_from_power(&power)
        })
        .collect()
}

fn filter_edges(
    sample_rate: u32,
    fft_len: usize,
    bands: usize,
    f_min: f32,
    f_max: f32,
) -> Vec<usize> {
    let mel_min = hz_to_mel(f_min);
    let mel_max = hz_to_mel(f_max.max(f_min));
    (0..bands + 2)
        .map(|i| {
            let t = i as f32 / (bands + 1) as f32;
            let hz = mel_to_hz(mel_min + (mel_max - mel_min) * t);
            freq_to_bin(hz, sample_rate, fft_len)
        })
        .collect()
}

fn triangle_weights(left: usize, center: usize, right: usize) -> Vec<(usize, f32)> {
    let mut weights = Vec::new();
    if right <= left {
        return weights;
    }
    for bin in left..=right {
        let w = if bin < center {
            if center == left {
                0.0
            } else {
                (bin - left) as f32 / (center - left) as f32
            }
        } else if right == center {
            0.0
        } else {
            (right - bin) as f32 / (right - center) as f32
        };
        if w > 0.0 {
            weights.push((bin, w));
        }
    }
    weights
}

fn freq_to_bin(freq_hz: f32, sample_rate: u32, fft_len: usize) -> usize {
    let sr = sample_rate.max(1) as f32;
    let freq = freq_hz.clamp(0.0, sr * 0.5);
    (((freq * fft_len as f32) / sr).floor() as usize).min(fft_len / 2)
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0_f32 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0_f32 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

fn dct_ii(values: &[f32], count: usize) -> Vec<f32> {
    let n = values.len().max(1) as f64;
    (0..count)
        .map(|k| {
            let mut sum = 0.0_f64;
            for (m, &v) in values.iter().enumerate() {
                let angle = std::f64::consts::PI * k as f64 * (m as f64 + 0.5) / n;
                sum += v as f64 * angle.cos();
            }
            sum as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::audio::ANALYSIS_SAMPLE_RATE;
    use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
    use crate::analysis::frequency_domain::stft::magnitude_spectrogram;

    #[test]
    fn cepstra_have_requested_length() {
        let bank = MelFilterBank::new(ANALYSIS_SAMPLE_RATE, STFT_FRAME_SIZE, 40, 13);
        let power = vec![0.0_f32; STFT_FRAME_SIZE / 2 + 1];
        assert_eq!(bank.cepstra_from_power(&power).len(), 13);
    }

    #[test]
    fn cepstral_matrix_is_deterministic() {
        let samples = vec![0.1_f32; ANALYSIS_SAMPLE_RATE as usize / 4];
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let a = cepstral_matrix(&spec, ANALYSIS_SAMPLE_RATE, 13);
        let b = cepstral_matrix(&spec, ANALYSIS_SAMPLE_RATE, 13);
        assert_eq!(a, b);
        assert!(a.iter().all(|row| row.len() == 13));
    }

    #[test]
    fn louder_signal_raises_first_cepstrum() {
        let quiet = vec![0.01_f32; STFT_FRAME_SIZE];
        let loud = vec![0.8_f32; STFT_FRAME_SIZE];
        let bank = MelFilterBank::new(ANALYSIS_SAMPLE_RATE, STFT_FRAME_SIZE, 40, 13);
        let spec_q = magnitude_spectrogram(&quiet, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let spec_l = magnitude_spectrogram(&loud, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let pq: Vec<f32> = spec_q.frames()[0].iter().map(|&m| m * m).collect();
        let pl: Vec<f32> = spec_l.frames()[0].iter().map(|&m| m * m).collect();
        assert!(bank.cepstra_from_power(&pl)[0] > bank.cepstra_from_power(&pq)[0]);
    }
}

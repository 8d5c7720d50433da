use crate::analysis::fft::{Complex32, fft_in_place, hann_window};

/// Magnitude spectrogram: one row of `bin_count()` magnitudes per frame.
///
/// Always holds at least one frame; shorter-than-frame input is zero padded.
pub(crate) struct Spectrogram {
    frames: Vec<Vec<f32>>,
    frame_size: usize,
}

impl Spectrogram {
    pub(crate) fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn bin_count(&self) -> usize {
        self.frame_size / 2 + 1
    }

    pub(crate) fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Across-time standard deviation of each frequency bin.
    pub(crate) fn per_bin_time_std(&self) -> Vec<f32> {
        let bins = self.bin_count();
        let frames = self.frames.len().max(1) as f64;
        let mut mean = vec![0.0_f64; bins];
        for frame in &self.frames {
            for (bin, &m) in frame.iter().enumerate() {
                mean[bin] += m as f64;
            }
        }
        for m in &mut mean {
            *m /= frames;
        }
        let mut var = vec![0.0_f64; bins];
        for frame in &self.frames {
            for (bin, &m) in frame.iter().enumerate() {
                let d = m as f64 - mean[bin];
                var[bin] += d * d;
            }
        }
        var.into_iter().map(|v| (v / frames).sqrt() as f32).collect()
    }

    /// Percentile over every time-frequency magnitude.
    pub(crate) fn magnitude_percentile(&self, q: f32) -> f32 {
        let flat: Vec<f32> = self.frames.iter().flatten().copied().collect();
        crate::analysis::stats::percentile(&flat, q)
    }

    pub(crate) fn total_magnitude(&self) -> f64 {
        self.frames
            .iter()
            .flatten()
            .map(|&m| m.max(0.0) as f64)
            .sum()
    }
}

pub(crate) fn magnitude_spectrogram(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Spectrogram {
    let frame_size = frame_size.max(2).next_power_of_two();
    let hop_size = hop_size.max(1);
    let window = hann_window(frame_size);
    let bins = frame_size / 2 + 1;
    let mut buffer = vec![Complex32::default(); frame_size];
    let mut frames = Vec::new();
    let mut start = 0usize;
    while start < samples.len() {
        fill_windowed(&mut buffer, samples, start, &window);
        if fft_in_place(&mut buffer).is_err() {
            break;
        }
        frames.push(buffer[..bins].iter().map(|c| c.magnitude()).collect());
        start = start.saturating_add(hop_size);
        if samples.len() <= frame_size {
            break;
        }
    }
    if frames.is_empty() {
        frames.push(vec![0.0_f32; bins]);
    }
    Spectrogram { frames, frame_size }
}

fn fill_windowed(target: &mut [Complex32], samples: &[f32], start: usize, window: &[f32]) {
    for (i, cell) in target.iter_mut().enumerate() {
        let src = samples.get(start + i).copied().unwrap_or(0.0);
        let src = if src.is_finite() { src } else { 0.0 };
        *cell = Complex32::new(src * window[i], 0.0);
    }
}

fn bin_frequency(bin: usize, sample_rate: u32, frame_size: usize) -> f32 {
    bin as f32 * sample_rate.max(1) as f32 / frame_size.max(1) as f32
}

/// Magnitude-weighted center-of-mass frequency per frame.
pub(crate) fn centroid_series(spec: &Spectrogram, sample_rate: u32) -> Vec<f32> {
    spec.frames()
        .iter()
        .map(|frame| {
            let mut sum = 0.0_f64;
            let mut weighted = 0.0_f64;
            for (bin, &m) in frame.iter().enumerate() {
                let m = m.max(0.0) as f64;
                sum += m;
                weighted += m * bin_frequency(bin, sample_rate, spec.frame_size) as f64;
            }
            if sum <= 0.0 { 0.0 } else { (weighted / sum) as f32 }
        })
        .collect()
}

const ROLLOFF_FRACTION: f32 = 0.85;

/// Frequency below which 85% of each frame's magnitude is contained.
pub(crate) fn rolloff_series(spec: &Spectrogram, sample_rate: u32) -> Vec<f32> {
    spec.frames()
        .iter()
        .map(|frame| {
            let total: f64 = frame.iter().map(|&m| m.max(0.0) as f64).sum();
            if total <= 0.0 {
                return 0.0;
            }
            let target = total * ROLLOFF_FRACTION as f64;
            let mut cum = 0.0_f64;
            for (bin, &m) in frame.iter().enumerate() {
                cum += m.max(0.0) as f64;
                if cum >= target {
                    return bin_frequency(bin, sample_rate, spec.frame_size);
                }
            }
            sample_rate as f32 * 0.5
        })
        .collect()
}

/// Per-frame spectral flatness (geometric over arithmetic mean of power).
pub(crate) fn flatness_series(spec: &Spectrogram) -> Vec<f32> {
    spec.frames()
        .iter()
        .map(|frame| {
            let eps = 1e-12_f64;
            let mut log_sum = 0.0_f64;
            let mut arith = 0.0_f64;
            for &m in frame {
                let p = (m.max(0.0) as f64).powi(2) + eps;
                log_sum += p.ln();
                arith += p;
            }
            let n = frame.len().max(1) as f64;
            let geom = (log_sum / n).exp();
            let arith = arith / n;
            if arith <= 0.0 {
                0.0
            } else {
                ((geom / arith).min(1.0)) as f32
            }
        })
        .collect()
}

/// Per-frame RMS energy derived from the spectrogram frames.
pub(crate) fn rms_series(spec: &Spectrogram) -> Vec<f32> {
    spec.frames()
        .iter()
        .map(|frame| {
            let sum: f64 = frame.iter().map(|&m| (m as f64) * (m as f64)).sum();
            (sum / frame.len().max(1) as f64).sqrt() as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::audio::ANALYSIS_SAMPLE_RATE;
    use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
    use crate::analysis::stats;

    fn sine(freq: f32, seconds: f32) -> Vec<f32> {
        let sr = ANALYSIS_SAMPLE_RATE as f32;
        (0..(sr * seconds) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sr).sin())
            .collect()
    }

    #[test]
    fn empty_input_yields_one_silent_frame() {
        let spec = magnitude_spectrogram(&[], STFT_FRAME_SIZE, STFT_HOP_SIZE);
        assert_eq!(spec.frame_count(), 1);
        assert_eq!(spec.bin_count(), STFT_FRAME_SIZE / 2 + 1);
        assert!(spec.total_magnitude() < 1e-9);
    }

    #[test]
    fn sine_centroid_tracks_tone_frequency() {
        let samples = sine(440.0, 1.0);
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let centroid = stats::mean(&centroid_series(&spec, ANALYSIS_SAMPLE_RATE));
        assert!(centroid > 300.0 && centroid < 700.0, "centroid {centroid}");
    }

    #[test]
    fn sine_rolloff_stays_near_tone() {
        let samples = sine(440.0, 1.0);
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let rolloff = stats::mean(&rolloff_series(&spec, ANALYSIS_SAMPLE_RATE));
        assert!(rolloff < 1_500.0, "rolloff {rolloff}");
    }

    #[test]
    fn sine_flatness_is_low() {
        let samples = sine(440.0, 1.0);
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let flatness = stats::mean(&flatness_series(&spec));
        assert!(flatness < 0.2, "flatness {flatness}");
    }

    #[test]
    fn steady_tone_has_stable_rms_series() {
        let samples = sine(220.0, 1.0);
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let rms = rms_series(&spec);
        // Zero-padded edge frames keep this above zero but it stays small.
        let cv = stats::coefficient_of_variation(&rms);
        assert!(cv < 0.4, "cv {cv}");
    }

    #[test]
    fn magnitude_percentiles_are_ordered() {
        let samples = sine(440.0, 0.5);
        let spec = magnitude_spectrogram(&samples, STFT_FRAME_SIZE, STFT_HOP_SIZE);
        let low = spec.magnitude_percentile(10.0);
        let high = spec.magnitude_percentile(90.0);
        assert!(high >= low);
    }
}

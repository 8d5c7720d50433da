//! Pacing-regularity likelihood from the energy envelope and onset timing.

use crate::analysis::audio::Waveform;
use crate::analysis::frequency_domain::onsets::{onset_strength, pick_peaks};
use crate::analysis::frequency_domain::stft::{magnitude_spectrogram, rms_series};
use crate::analysis::frequency_domain::{STFT_FRAME_SIZE, STFT_HOP_SIZE};
use crate::analysis::stats::{EPSILON, mean, std_dev};

/// Neutral result when no indicator is computable.
const NEUTRAL_SCORE: f32 = 0.5;

/// Score in [0, 1]; higher means unnaturally regular pacing. Mean of the
/// computable indicators, or 0.5 when none is.
pub fn temporal_score(wave: &Waveform) -> f32 {
    let spec = magnitude_spectrogram(wave.samples(), STFT_FRAME_SIZE, STFT_HOP_SIZE);
    let mut indicators = Vec::with_capacity(2);

    let rms = rms_series(&spec);
    if !rms.is_empty() {
        let cv = std_dev(&rms) / (mean(&rms) + EPSILON);
        indicators.push((cv / 0.5).min(1.0));
    }

    // Needs at least two onsets to measure inter-onset regularity.
    let peaks = pick_peaks(&onset_strength(&spec));
    if peaks.len() >= 2 {
        let hop_seconds = STFT_HOP_SIZE as f32 / wave.sample_rate().max(1) as f32;
        let intervals: Vec<f32> = peaks
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) as f32 * hop_seconds)
            .collect();
        let cv = std_dev(&intervals) / (mean(&intervals) + EPSILON);
        indicators.push(1.0 - (cv / 2.0).min(1.0));
    }

    if indicators.is_empty() {
        return NEUTRAL_SCORE;
    }
    mean(&indicators).clamp(0.0, 1.0)
}

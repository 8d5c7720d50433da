//! Onset strength (positive spectral flux) and peak picking.

use super::stft::Spectrogram;

/// Frames a candidate must beat on each side to count as a local maximum,
/// and the span of the local-mean threshold.
const PEAK_WINDOW: usize = 3;
/// Minimum gap between picked peaks, in frames.
const PEAK_WAIT: usize = 3;
/// Offset above the local mean, on the max-normalized strength scale.
const PEAK_DELTA: f32 = 0.1;

/// Per-frame mean positive spectral flux. First frame is 0 by construction.
pub(crate) fn onset_strength(spec: &Spectrogram) -> Vec<f32> {
    let frames = spec.frames();
    let mut strength = Vec::with_capacity(frames.len());
    strength.push(0.0);
    for pair in frames.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let mut flux = 0.0_f64;
        for (p, c) in prev.iter().zip(cur.iter()) {
            let d = (c - p).max(0.0);
            flux += d as f64;
        }
        strength.push((flux / prev.len().max(1) as f64) as f32);
    }
    strength
}

/// Pick peak frames from an onset-strength curve.
///
/// The curve is normalized by its maximum first; a frame is a peak when it
/// is the maximum of its ±PEAK_WINDOW neighborhood, exceeds the local mean
/// by PEAK_DELTA, and lies at least PEAK_WAIT frames after the previous peak.
pub(crate) fn pick_peaks(strength: &[f32]) -> Vec<usize> {
    let peak = strength.iter().copied().fold(0.0_f32, f32::max);
    if peak <= 0.0 {
        return Vec::new();
    }
    let normalized: Vec<f32> = strength.iter().map(|&v| (v / peak).max(0.0)).collect();

    let mut peaks = Vec::new();
    let mut last_peak: Option<usize> = None;
    for i in 0..normalized.len() {
        let lo = i.saturating_sub(PEAK_WINDOW);
        let hi = (i + PEAK_WINDOW + 1).min(normalized.len());
        let window = &normalized[lo..hi];
        let local_max = window.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let local_mean = window.iter().copied().sum::<f32>() / window.len() as f32;
        if normalized[i] < local_max || normalized[i] < local_mean + PEAK_DELTA {
            continue;
        }
        if last_peak.is_some_and(|p| i - p <= PEAK_WAIT) {
            continue;
        }
        peaks.push(i);
        last_peak = Some(i);
    }
    peaks
}

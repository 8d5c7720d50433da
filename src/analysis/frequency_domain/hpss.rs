//! Harmonic/percussive separation via median filtering of the spectrogram.

use super::stft::Spectrogram;

/// Median-filter kernel length along each axis.
const KERNEL: usize = 31;

/// Share of total spectrogram magnitude assigned to the harmonic component
/// by a soft (Wiener, power 2) mask. Result is in [0, 1].
pub(crate) fn harmonic_energy_ratio(spec: &Spectrogram) -> f32 {
    let frames = spec.frames();
    if frames.is_empty() {
        return 0.0;
    }
    let bins = spec.bin_count();
    let half = KERNEL / 2;
    let mut scratch = Vec::with_capacity(KERNEL);

    let mut harmonic_sum = 0.0_f64;
    let mut total_sum = 0.0_f64;
    for (t, frame) in frames.iter().enumerate() {
        for bin in 0..bins.min(frame.len()) {
            // Harmonic enhancement: median across time at this frequency.
            let t_lo = t.saturating_sub(half);
            let t_hi = (t + half + 1).min(frames.len());
            scratch.clear();
            scratch.extend(frames[t_lo..t_hi].iter().filter_map(|f| f.get(bin)).copied());
            let h = median(&mut scratch);

            // Percussive enhancement: median across frequency in this frame.
            let b_lo = bin.saturating_sub(half);
            let b_hi = (bin + half + 1).min(frame.len());
            scratch.clear();
            scratch.extend_from_slice(&frame[b_lo..b_hi]);
            let p = median(&mut scratch);

            let s = frame[bin].max(0.0) as f64;
            let h2 = (h as f64) * (h as f64);
            let p2 = (p as f64) * (p as f64);
            let mask = if h2 + p2 > 0.0 { h2 / (h2 + p2) } else { 0.0 };
            harmonic_sum += mask * s;
            total_sum += s;
        }
    }
    if total_sum <= 0.0 {
        return 0.0;
    }
    ((harmonic_sum / total_sum) as f32).clamp(0.0, 1.0)
}

fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mid = values.len() / 2;
    let (_, m, _) = values.select_nth_unstable_by(mid, f32::total_cmp);
    *m
}

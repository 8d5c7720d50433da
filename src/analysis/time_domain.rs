//! Time-domain descriptors: zero crossings and short-lag periodicity.

/// Fraction of sign changes per analysis frame.
pub(crate) fn zero_crossing_rate_series(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Vec<f32> {
    let frame_size = frame_size.max(2);
    let hop_size = hop_size.max(1);
    if samples.len() < 2 {
        return vec![0.0];
    }
    let mut series = Vec::new();
    let mut start = 0usize;
    while start < samples.len() {
        let end = (start + frame_size).min(samples.len());
        let frame = &samples[start..end];
        series.push(frame_crossing_rate(frame, frame_size));
        start = start.saturating_add(hop_size);
        if samples.len() <= frame_size {
            break;
        }
    }
    if series.is_empty() {
        series.push(0.0);
    }
    series
}

fn frame_crossing_rate(frame: &[f32], frame_size: usize) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }
    let mut crossings = 0u32;
    for pair in frame.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if (prev >= 0.0) != (cur >= 0.0) {
            crossings += 1;
        }
    }
    crossings as f32 / frame_size as f32
}

/// Largest normalized autocorrelation within the first `max_lag_seconds`
/// (excluding lag 0), i.e. r_max / r_0. Clamped to [0, 1].
pub(crate) fn short_lag_periodicity(
    samples: &[f32],
    sample_rate: u32,
    max_lag_seconds: f32,
) -> f32 {
    let r0: f64 = samples.iter().map(|&v| (v as f64) * (v as f64)).sum();
    if r0 <= 1e-12 {
        return 0.0;
    }
    let max_lag = ((max_lag_seconds * sample_rate.max(1) as f32) as usize)
        .min(samples.len().saturating_sub(1));
    let mut best = f64::NEG_INFINITY;
    for lag in 1..=max_lag {
        let mut r = 0.0_f64;
        for i in 0..samples.len() - lag {
            r += samples[i] as f64 * samples[i + lag] as f64;
        }
        if r > best {
            best = r;
        }
    }
    if !best.is_finite() {
        return 0.0;
    }
    ((best / r0) as f32).clamp(0.0, 1.0)
}

//! Scalar statistics shared by feature extraction and scoring.

pub(crate) fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().copied().map(f64::from).sum();
    (sum / values.len() as f64) as f32
}

/// Population standard deviation (divides by N, not N-1).
pub(crate) fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values) as f64;
    let mut var = 0.0_f64;
    for &v in values {
        let d = v as f64 - m;
        var += d * d;
    }
    (var / values.len() as f64).sqrt() as f32
}

pub(crate) fn min_value(values: &[f32]) -> f32 {
    values.iter().copied().fold(f32::INFINITY, f32::min)
}

pub(crate) fn max_value(values: &[f32]) -> f32 {
    values.iter().copied().fold(f32::NEG_INFINITY, f32::max)
}

/// Linear-interpolated percentile, `q` in [0, 100]. Returns 0 for empty input.
pub(crate) fn percentile(values: &[f32], q: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let q = q.clamp(0.0, 100.0) as f64 / 100.0;
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = (pos - lower as f64) as f32;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub(crate) const EPSILON: f32 = 1e-8;

/// Coefficient of variation with the pipeline-wide epsilon guard.
pub(crate) fn coefficient_of_variation(values: &[f32]) -> f32 {
    std_dev(values) / (mean(values) + EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_has_zero_spread() {
        let values = vec![0.5_f32; 32];
        assert!((mean(&values) - 0.5).abs() < 1e-6);
        assert!(std_dev(&values).abs() < 1e-6);
        assert!(coefficient_of_variation(&values).abs() < 1e-6);
    }

    #[test]
    fn percentile_interpolates_between_samples() {
        let values = vec![0.0_f32, 1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&values, 0.0) - 0.0).abs() < 1e-6);
        assert!((percentile(&values, 100.0) - 4.0).abs() < 1e-6);
        assert!((percentile(&values, 50.0) - 2.0).abs() < 1e-6);
        assert!((percentile(&values, 25.0) - 1.0).abs() < 1e-6);
        assert!((percentile(&values, 10.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn percentile_of_empty_input_is_zero() {
        assert_eq!(percentile(&[], 90.0), 0.0);
    }

    #[test]
    fn min_and_max_track_extremes() {
        let values = vec![-1.5_f32, 0.0, 3.25, 2.0];
        assert_eq!(min_value(&values), -1.5);
        assert_eq!(max_value(&values), 3.25);
    }
}

//! Chromagram: spectrogram power folded onto the 12 pitch classes.

use super::stft::Spectrogram;

pub(crate) const CHROMA_BINS: usize = 12;

/// Per-frame chroma vectors, each frame normalized by its maximum so
/// values land in [0, 1].
pub(crate) fn chroma_matrix(spec: &Spectrogram, sample_rate: u32) -> Vec<[f32; CHROMA_BINS]> {
    let classes = bin_pitch_classes(spec.bin_count(), sample_rate, spec.frame_size());
    spec.frames()
        .iter()
        .map(|frame| {
            let mut chroma = [0.0_f32; CHROMA_BINS];
            for (bin, &m) in frame.iter().enumerate() {
                if let Some(class) = classes[bin] {
                    chroma[class] += m * m;
                }
            }
            let peak = chroma.iter().copied().fold(0.0_f32, f32::max);
            if peak > 1e-12 {
                for v in &mut chroma {
                    *v /= peak;
                }
            }
            chroma
        })
        .collect()
}

/// Pitch class per FFT bin, `None` for DC and sub-audible bins.
fn bin_pitch_classes(
    bins: usize,
    sample_rate: u32,
    frame_size: usize,
) -> Vec<Option<usize>> {
    let sr = sample_rate.max(1) as f32;
    (0..bins)
        .map(|bin| {
            let freq = bin as f32 * sr / frame_size.max(1) as f32;
            if freq < 20.0 {
                return None;
            }
            let midi = 69.0 + 12.0 * (freq / 440.0).log2();
            Some((midi.round() as i64).rem_euclid(12) as usize)
        })
        .collect()
}

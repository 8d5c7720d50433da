//! Frequency-domain primitives: STFT, spectral series, cepstra, chroma,
//! harmonic/percussive split, onset detection.

pub(crate) mod chroma;
pub(crate) mod hpss;
pub(crate) mod mel;
pub(crate) mod onsets;
pub(crate) mod stft;

pub(crate) const STFT_FRAME_SIZE: usize = 1024;
pub(crate) const STFT_HOP_SIZE: usize = 512;

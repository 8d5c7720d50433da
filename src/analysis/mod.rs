//! Signal-analysis primitives (decoding, spectral transforms, statistics).

pub mod audio;
pub(crate) mod fft;
pub(crate) mod frequency_domain;
pub(crate) mod stats;
pub(crate) mod time_domain;

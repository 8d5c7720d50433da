//! Audio byte decoding and waveform preparation.

mod decode;
mod resample;

use std::str::FromStr;

pub use decode::decode_bytes;
pub(crate) use resample::resample_linear;

/// Fixed sample rate the pipeline analyzes at.
pub const ANALYSIS_SAMPLE_RATE: u32 = 16_000;
/// Shortest recording the pipeline accepts.
pub const MIN_ANALYSIS_SECONDS: f32 = 1.0;
/// Decoding stops once this much audio has been produced.
pub const MAX_DECODE_SECONDS: f32 = 120.0;

/// Container/codec declared by the caller for the uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn as_extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// A format tag outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported audio format '{0}' (expected wav or mp3)")]
pub struct UnsupportedFormat(pub String);

impl FromStr for AudioFormat {
    type Err = UnsupportedFormat;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            other => Err(UnsupportedFormat(other.to_owned())),
        }
    }
}

/// Errors raised while turning caller bytes into an analyzable waveform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The codec could not parse the byte stream.
    #[error("unreadable audio: {0}")]
    Unreadable(String),
    /// Decoded audio is below the one-second minimum.
    #[error("audio too short (minimum {MIN_ANALYSIS_SECONDS} second of audio required)")]
    TooShort,
}

/// Mono floating-point audio at [`ANALYSIS_SAMPLE_RATE`].
///
/// Built only by the decoder, which guarantees at least one second of
/// finite samples. Owned by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

//! Classification pipeline: decode, score, fuse, explain.
//!
//! The boundary function [`detect_voice`] never fails: every internal error
//! is recovered into a fixed low-confidence human verdict so the caller
//! always receives a usable result.

pub mod config;
mod artifact;
mod explain;
mod features;
mod fuse;
mod spectral;
mod temporal;

use std::fmt;

use serde::Serialize;

use crate::analysis::audio::{AudioFormat, DecodeError, Waveform, decode_bytes};
pub use artifact::artifact_score;
pub use config::{DetectorConfig, FusionWeights};
pub use explain::explain;
pub use features::{DescriptorVector, extract_descriptor};
pub use fuse::{feature_variance_indicator, fuse};
pub use spectral::spectral_score;
pub use temporal::temporal_score;

/// Confidence reported by the degraded fallback verdict.
const FALLBACK_CONFIDENCE: f32 = 0.3;

/// The two possible verdict labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    #[serde(rename = "AI-generated")]
    AiGenerated,
    #[serde(rename = "human")]
    Human,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::AiGenerated => "AI-generated",
            Label::Human => "human",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The boundary tuple: label, confidence rounded to 2 decimals, rationale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: Label,
    pub confidence: f32,
    pub explanation: String,
}

/// Scorer outputs plus the derived feature-variance signal, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSet {
    pub artifact: f32,
    pub temporal: f32,
    pub spectral: f32,
    pub feature_variance: f32,
}

/// Every way the pipeline can fail before producing a score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Decode(#[from] DecodeError),
}

/// Outcome of one detection: a real score, or the fixed fallback verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Scored(Classification),
    Degraded(Classification),
}

impl Detection {
    pub fn classification(&self) -> &Classification {
        match self {
            Detection::Scored(c) | Detection::Degraded(c) => c,
        }
    }

    pub fn into_classification(self) -> Classification {
        match self {
            Detection::Scored(c) | Detection::Degraded(c) => c,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Detection::Degraded(_))
    }
}

/// Classify raw audio bytes. Infallible by contract: any internal failure
/// yields `Detection::Degraded` with the fixed human/0.3 verdict.
pub fn detect_voice(bytes: &[u8], format: AudioFormat, config: &DetectorConfig) -> Detection {
    match run_pipeline(bytes, format, config) {
        Ok(classification) => Detection::Scored(classification),
        Err(err) => {
            tracing::warn!(error = %err, "classification degraded to fallback");
            Detection::Degraded(fallback_classification(&err))
        }
    }
}

fn run_pipeline(
    bytes: &[u8],
    format: AudioFormat,
    config: &DetectorConfig,
) -> Result<Classification, PipelineError> {
    let wave = decode_bytes(bytes, format, config.sample_rate)?;
    Ok(classify_waveform(&wave, config))
}

/// Score an already-decoded waveform. Pure over its inputs.
pub fn classify_waveform(wave: &Waveform, config: &DetectorConfig) -> Classification {
    let descriptor = extract_descriptor(wave, config);
    let scores = ScoreSet {
        artifact: artifact_score(wave, config),
        temporal: temporal_score(wave),
        spectral: spectral_score(wave),
        feature_variance: feature_variance_indicator(&descriptor),
    };
    let probability = fuse(
        &descriptor,
        scores.artifact,
        scores.temporal,
        scores.spectral,
        &config.weights,
    );
    tracing::debug!(
        artifact = scores.artifact,
        temporal = scores.temporal,
        spectral = scores.spectral,
        feature_variance = scores.feature_variance,
        probability,
        "waveform scored"
    );
    let (label, explanation) = explain(probability, &scores);
    Classification {
        label,
        confidence: round_to_2_decimals(probability),
        explanation,
    }
}

/// The single place the degraded verdict is built.
fn fallback_classification(err: &PipelineError) -> Classification {
    Classification {
        label: Label::Human,
        confidence: FALLBACK_CONFIDENCE,
        explanation: format!("Processing error (defaulting to human): {err}"),
    }
}

fn round_to_2_decimals(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

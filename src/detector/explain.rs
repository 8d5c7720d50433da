//! Label selection and human-readable rationale.

use crate::detector::{Label, ScoreSet};

/// Inclusive decision threshold: exactly 0.5 classifies as AI-generated.
const AI_THRESHOLD: f32 = 0.5;

/// Map the fused probability and scorer values to a label and rationale.
///
/// On the AI branch the single strongest of artifact/temporal/spectral is
/// named, ties broken in that order. The feature-variance signal is never
/// cited even when it dominated the fusion.
pub fn explain(probability: f32, scores: &ScoreSet) -> (Label, String) {
    if probability >= AI_THRESHOLD {
        let indicators = [
            ("spectral artifacts", scores.artifact),
            ("pitch consistency", scores.temporal),
            ("spectral patterns", scores.spectral),
        ];
        // First-listed wins ties, so strictly-greater comparison only.
        let mut top = indicators[0];
        for candidate in &indicators[1..] {
            if candidate.1 > top.1 {
                top = *candidate;
            }
        }
        let text = format!(
            "Audio exhibits characteristics consistent with AI generation. \
             Key indicator: {} (confidence: {:.1}%). Analysis based on spectral \
             features, temporal patterns, and digital artifact detection.",
            top.0,
            probability * 100.0
        );
        (Label::AiGenerated, text)
    } else {
        let text = format!(
            "Audio exhibits characteristics consistent with natural human speech. \
             Analysis detected natural variability in spectral and temporal features. \
             Confidence: {:.1}%. Language-agnostic detection based on signal \
             processing techniques.",
            (1.0 - probability) * 100.0
        );
        (Label::Human, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(artifact: f32, temporal: f32, spectral: f32) -> ScoreSet {
        ScoreSet {
            artifact,
            temporal,
            spectral,
            feature_variance: 0.0,
        }
    }

    #[test]
    fn threshold_is_inclusive_on_the_ai_side() {
        let (label, _) = explain(0.5, &scores(0.5, 0.5, 0.5));
        assert_eq!(label, Label::AiGenerated);
        let (label, _) = explain(0.499, &scores(0.5, 0.5, 0.5));
        assert_eq!(label, Label::Human);
    }

    #[test]
    fn dominant_indicator_is_named() {
        let (_, text) = explain(0.8, &scores(0.2, 0.9, 0.3));
        assert!(text.contains("pitch consistency"), "{text}");
        let (_, text) = explain(0.8, &scores(0.2, 0.3, 0.9));
        assert!(text.contains("spectral patterns"), "{text}");
    }

    #[test]
    fn ties_resolve_in_listed_order() {
        let (_, text) = explain(0.7, &scores(0.6, 0.6, 0.6));
        assert!(text.contains("spectral artifacts"), "{text}");
        let (_, text) = explain(0.7, &scores(0.1, 0.6, 0.6));
        assert!(text.contains("pitch consistency"), "{text}");
    }

    #[test]
    fn human_branch_reports_inverted_confidence() {
        let (label, text) = explain(0.25, &scores(0.9, 0.1, 0.1));
        assert_eq!(label, Label::Human);
        assert!(text.contains("75.0%"), "{text}");
    }

    #[test]
    fn ai_branch_reports_probability_as_percentage() {
        let (_, text) = explain(0.873, &scores(0.9, 0.1, 0.1));
        assert!(text.contains("87.3%"), "{text}");
    }
}

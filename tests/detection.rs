//! Boundary tests: raw bytes in, verdict tuple out.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::{Rng, SeedableRng, rngs::StdRng};
use voiceproof::analysis::audio::{ANALYSIS_SAMPLE_RATE, decode_bytes};
use voiceproof::detector::extract_descriptor;
use voiceproof::{AudioFormat, DetectorConfig, Label, detect_voice};

fn wav_bytes(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    cursor.into_inner()
}

fn sine_samples(freq: f32, seconds: f32, sample_rate: u32) -> Vec<f32> {
    (0..(sample_rate as f32 * seconds) as usize)
        .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.5)
        .collect()
}

#[test]
fn valid_wav_produces_a_scored_verdict() {
    let bytes = wav_bytes(&sine_samples(440.0, 2.0, ANALYSIS_SAMPLE_RATE), ANALYSIS_SAMPLE_RATE, 1);
    let detection = detect_voice(&bytes, AudioFormat::Wav, &DetectorConfig::default());
    assert!(!detection.is_degraded());
    let classification = detection.into_classification();
    assert!(matches!(classification.label, Label::AiGenerated | Label::Human));
    assert!((0.0..=1.0).contains(&classification.confidence));
    assert!(!classification.explanation.is_empty());
}

#[test]
fn identical_bytes_yield_identical_verdicts() {
    let bytes = wav_bytes(&sine_samples(330.0, 1.5, ANALYSIS_SAMPLE_RATE), ANALYSIS_SAMPLE_RATE, 1);
    let config = DetectorConfig::default();
    let first = detect_voice(&bytes, AudioFormat::Wav, &config).into_classification();
    let second = detect_voice(&bytes, AudioFormat::Wav, &config).into_classification();
    assert_eq!(first, second);
}

#[test]
fn empty_payload_degrades_to_the_fixed_fallback() {
    let detection = detect_voice(&[], AudioFormat::Wav, &DetectorConfig::default());
    assert!(detection.is_degraded());
    let classification = detection.into_classification();
    assert_eq!(classification.label, Label::Human);
    assert_eq!(classification.confidence, 0.3);
    assert!(classification.explanation.starts_with("Processing error"));
}

#[test]
fn sub_second_payload_degrades_to_the_fixed_fallback() {
    let bytes = wav_bytes(&sine_samples(440.0, 0.5, ANALYSIS_SAMPLE_RATE), ANALYSIS_SAMPLE_RATE, 1);
    let detection = detect_voice(&bytes, AudioFormat::Wav, &DetectorConfig::default());
    assert!(detection.is_degraded());
    let classification = detection.into_classification();
    assert_eq!((classification.label, classification.confidence), (Label::Human, 0.3));
    assert!(classification.explanation.starts_with("Processing error"));
}

#[test]
fn garbage_mp3_payload_degrades_instead_of_failing() {
    let bytes: Vec<u8> = (0..4096).map(|i| (i * 31 % 251) as u8).collect();
    let detection = detect_voice(&bytes, AudioFormat::Mp3, &DetectorConfig::default());
    assert!(detection.is_degraded());
    assert_eq!(detection.classification().confidence, 0.3);
}

#[test]
fn stereo_high_rate_wav_is_accepted() {
    let source_rate = 44_100_u32;
    let mono = sine_samples(220.0, 2.0, source_rate);
    let mut interleaved = Vec::with_capacity(mono.len() * 2);
    for &sample in &mono {
        interleaved.push(sample);
        interleaved.push(sample * 0.5);
    }
    let bytes = wav_bytes(&interleaved, source_rate, 2);
    let detection = detect_voice(&bytes, AudioFormat::Wav, &DetectorConfig::default());
    assert!(!detection.is_degraded());
}

#[test]
fn noise_payload_is_scored_not_degraded() {
    let mut rng = StdRng::seed_from_u64(1234);
    let samples: Vec<f32> = (0..ANALYSIS_SAMPLE_RATE as usize * 2)
        .map(|_| rng.random_range(-0.6_f32..0.6))
        .collect();
    let bytes = wav_bytes(&samples, ANALYSIS_SAMPLE_RATE, 1);
    let detection = detect_voice(&bytes, AudioFormat::Wav, &DetectorConfig::default());
    assert!(!detection.is_degraded());
}

#[test]
fn wav_read_back_from_disk_matches_in_memory_verdict() {
    let bytes = wav_bytes(&sine_samples(440.0, 1.0, ANALYSIS_SAMPLE_RATE), ANALYSIS_SAMPLE_RATE, 1);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.wav");
    std::fs::write(&path, &bytes).unwrap();
    let from_disk = std::fs::read(&path).unwrap();

    let config = DetectorConfig::default();
    let direct = detect_voice(&bytes, AudioFormat::Wav, &config).into_classification();
    let via_file = detect_voice(&from_disk, AudioFormat::Wav, &config).into_classification();
    assert_eq!(direct, via_file);
}

#[test]
fn descriptor_is_stable_across_independent_decodes() {
    let bytes = wav_bytes(&sine_samples(262.0, 1.0, ANALYSIS_SAMPLE_RATE), ANALYSIS_SAMPLE_RATE, 1);
    let config = DetectorConfig::default();
    let wave_a = decode_bytes(&bytes, AudioFormat::Wav, config.sample_rate).unwrap();
    let wave_b = decode_bytes(&bytes, AudioFormat::Wav, config.sample_rate).unwrap();
    let descriptor_a = extract_descriptor(&wave_a, &config);
    let descriptor_b = extract_descriptor(&wave_b, &config);
    assert_eq!(descriptor_a.len(), 86);
    for (a, b) in descriptor_a.as_slice().iter().zip(descriptor_b.as_slice()) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }
}

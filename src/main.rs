//! Command-line front end: classify one audio file and print JSON.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use voiceproof::{AudioFormat, DetectorConfig, detect_voice, logging};

#[derive(Serialize)]
struct Report<'a> {
    classification: &'a str,
    confidence: f32,
    explanation: &'a str,
    degraded: bool,
    processing_time_ms: f32,
}

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run(std::env::args().skip(1).collect()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let (path, format_override) = parse_args(&args)?;
    let format = match format_override {
        Some(tag) => tag.parse::<AudioFormat>().map_err(|err| err.to_string())?,
        None => format_from_extension(&path)?,
    };
    let bytes = std::fs::read(&path).map_err(|err| format!("Failed to read {path}: {err}"))?;

    let started = Instant::now();
    let detection = detect_voice(&bytes, format, &DetectorConfig::default());
    let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;

    let degraded = detection.is_degraded();
    let classification = detection.into_classification();
    let report = Report {
        classification: classification.label.as_str(),
        confidence: classification.confidence,
        explanation: &classification.explanation,
        degraded,
        processing_time_ms: (elapsed_ms * 100.0).round() / 100.0,
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("Failed to serialize report: {err}"))?;
    println!("{json}");
    Ok(())
}

fn parse_args(args: &[String]) -> Result<(String, Option<String>), String> {
    let mut path = None;
    let mut format = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                format = Some(
                    iter.next()
                        .ok_or_else(|| "--format requires a value (wav or mp3)".to_owned())?
                        .clone(),
                );
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other if path.is_none() => path = Some(other.to_owned()),
            other => return Err(format!("Unexpected argument '{other}'\n{USAGE}")),
        }
    }
    let path = path.ok_or_else(|| USAGE.to_owned())?;
    Ok((path, format))
}

fn format_from_extension(path: &str) -> Result<AudioFormat, String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Cannot infer format of {path}; pass --format wav|mp3"))?;
    extension.parse::<AudioFormat>().map_err(|err| err.to_string())
}

const USAGE: &str = "Usage: voiceproof <audio-file> [--format wav|mp3]";

use std::io::Cursor;

use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error, formats::FormatOptions,
    io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

use super::resample::resample_linear;
use super::{AudioFormat, DecodeError, MAX_DECODE_SECONDS, MIN_ANALYSIS_SECONDS, Waveform};

/// Decode compressed/raw audio bytes into a mono waveform at `target_rate`.
///
/// Pure transformation: downmixes to mono, resamples, and enforces the
/// one-second minimum. Decoding stops after [`MAX_DECODE_SECONDS`] of audio.
pub fn decode_bytes(
    bytes: &[u8],
    format: AudioFormat,
    target_rate: u32,
) -> Result<Waveform, DecodeError> {
    let target_rate = target_rate.max(1);
    let (interleaved, source_rate, channels) = decode_with_symphonia(bytes, format)?;
    let mono = downmix_to_mono(&interleaved, channels);
    if mono.iter().any(|v| !v.is_finite()) {
        return Err(DecodeError::Unreadable(
            "decoded stream contains non-finite samples".into(),
        ));
    }
    let resampled = resample_linear(&mono, source_rate, target_rate);
    let min_samples = (MIN_ANALYSIS_SECONDS * target_rate as f32).round() as usize;
    if resampled.len() < min_samples {
        return Err(DecodeError::TooShort);
    }
    Ok(Waveform::new(resampled, target_rate))
}

fn decode_with_symphonia(
    bytes: &[u8],
    format: AudioFormat,
) -> Result<(Vec<f32>, u32, u16), DecodeError> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(bytes.to_vec())),
        Default::default(),
    );
    let mut hint = Hint::new();
    hint.with_extension(format.as_extension());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| DecodeError::Unreadable(format!("probe failed: {err}")))?;
    let mut reader = probed.format;
    let track = reader
        .default_track()
        .ok_or_else(|| DecodeError::Unreadable("no default audio track".into()))?;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| DecodeError::Unreadable("missing sample rate".into()))?
        .max(1);
    let channels = codec_params
        .channels
        .ok_or_else(|| DecodeError::Unreadable("missing channel count".into()))?
        .count()
        .max(1) as u16;
    let max_samples = ((MAX_DECODE_SECONDS * sample_rate as f32).ceil() as usize)
        .saturating_mul(channels as usize);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|err| DecodeError::Unreadable(format!("no decoder: {err}")))?;

    let mut samples = Vec::new();
    loop {
        if samples.len() >= max_samples {
            samples.truncate(max_samples);
            break;
        }
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) => break,
            Err(err) => {
                return Err(DecodeError::Unreadable(format!("packet read failed: {err}")));
            }
        };
        let audio_buf = match decoder.decode(&packet) {
            Ok(audio_buf) => audio_buf,
            // Skip corrupt packets the way the codec intends; fail on anything else.
            Err(Error::DecodeError(_)) => continue,
            Err(err) => return Err(DecodeError::Unreadable(format!("decode failed: {err}"))),
        };
        let spec = *audio_buf.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(audio_buf);
        samples.extend_from_slice(sample_buf.samples());
    }

    if samples.is_empty() {
        return Err(DecodeError::Unreadable("decoded zero samples".into()));
    }
    Ok((samples, sample_rate, channels))
}

fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return samples.to_vec();
    }
    let frames = samples.len() / channels;
    let mut mono = Vec::with_capacity(frames);
    for frame in 0..frames {
        let start = frame * channels;
        let sum: f32 = samples[start..start + channels].iter().copied().sum();
        mono.push(sum / channels as f32);
    }
    mono
}

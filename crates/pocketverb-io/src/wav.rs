//! WAV file reading and writing.
//!
//! Everything is decoded to `f32` in `[-1, 1]`. Integer PCM is scaled by
//! `2^(bits-1)`; 32-bit files are written as IEEE float.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::io::Read;
use std::path::Path;

pub use pocketverb_core::StereoSamples;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without decoding any samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(Error::UnsupportedChannels(0));
    }
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Output file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 for PCM, 32 for float.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Decode every sample of an open reader to normalized `f32`, interleaved.
fn decode<R: Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = full_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

fn full_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

fn check_bit_depth(bits: u16) -> Result<()> {
    match bits {
        16 | 24 | 32 => Ok(()),
        other => Err(Error::UnsupportedBitDepth(other)),
    }
}

/// Write frames through a hound writer, quantizing for integer formats.
fn encode<'a, I>(path: &Path, spec: WavSpec, samples: I) -> Result<()>
where
    I: Iterator<Item = &'a f32>,
{
    check_bit_depth(spec.bits_per_sample)?;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let scale = full_scale(spec.bits_per_sample);
        for &sample in samples {
            let quantized = (sample * scale).clamp(-scale, scale - 1.0) as i32;
            writer.write_sample(quantized)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as mono, averaging channels of multi-channel files.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);
    if channels == 0 {
        return Err(Error::UnsupportedChannels(0));
    }
    let samples = decode(reader)?;

    let mono = if channels > 1 {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    tracing::debug!(path = %path.display(), frames = mono.len(), "read mono WAV");
    Ok((mono, spec))
}

/// Write a mono WAV file. `spec.channels` must be 1.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    if spec.channels != 1 {
        return Err(Error::UnsupportedChannels(spec.channels));
    }
    let path = path.as_ref();
    encode(path, spec, samples.iter())?;
    tracing::debug!(path = %path.display(), frames = samples.len(), "wrote mono WAV");
    Ok(())
}

/// Read a WAV file as stereo.
///
/// Mono files are duplicated to both channels. Files with more than two
/// channels keep the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);
    let samples = decode(reader)?;

    let stereo = match channels {
        0 => return Err(Error::UnsupportedChannels(0)),
        1 => StereoSamples::from_mono(samples),
        2 => StereoSamples::from_interleaved(&samples),
        _ => {
            let (left, right): (Vec<f32>, Vec<f32>) = samples
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip();
            StereoSamples::new(left, right)
        }
    };

    tracing::info!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = stereo.len(),
        "loaded WAV"
    );
    Ok((stereo, spec))
}

/// Write a stereo WAV file. The channel count in `spec` is forced to 2.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec { channels: 2, ..spec };
    let interleaved = samples.to_interleaved();
    encode(path, spec, interleaved.iter())?;

    tracing::info!(
        path = %path.display(),
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32) * 1.8 - 0.9).collect()
    }

    #[test]
    fn test_float_stereo_is_lossless() {
        let samples = StereoSamples::new(ramp(500), ramp(500).into_iter().rev().collect());
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_pcm16_within_one_step() {
        let samples = StereoSamples::from_mono(ramp(500));
        let spec = WavSpec {
            bits_per_sample: 16,
            sample_rate: 44100,
            ..WavSpec::default()
        };
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        for (a, b) in samples.left.iter().zip(&loaded.left) {
            assert!((a - b).abs() <= 1.0 / 32768.0);
        }
    }

    #[test]
    fn test_pcm_clips_full_scale() {
        let samples = StereoSamples::new(vec![2.0, -2.0], vec![1.0, -1.0]);
        let spec = WavSpec {
            bits_per_sample: 16,
            ..WavSpec::default()
        };
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav_stereo(file.path()).unwrap();
        assert!(loaded.left[0] < 1.0);
        assert_eq!(loaded.left[1], -1.0);
    }

    #[test]
    fn test_mono_file_reads_as_dual_mono() {
        let mono = ramp(64);
        let spec = WavSpec {
            channels: 1,
            ..WavSpec::default()
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &mono, spec).unwrap();

        let (stereo, _) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(stereo.left, mono);
        assert_eq!(stereo.right, mono);
    }

    #[test]
    fn test_mono_writer_rejects_stereo_spec() {
        let file = NamedTempFile::new().unwrap();
        let err = write_wav(file.path(), &[0.0], WavSpec::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedChannels(2)));
    }

    #[test]
    fn test_rejects_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 12,
            ..WavSpec::default()
        };
        let err = write_wav_stereo(file.path(), &StereoSamples::silence(4), spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitDepth(12)));
    }

    #[test]
    fn test_info_reports_frames_and_format() {
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &StereoSamples::silence(24_000), WavSpec::default())
            .unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 24_000);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
    }
}

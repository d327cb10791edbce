//! WAV reading and writing.
//!
//! Output is plain 16-bit PCM mono. Reading accepts the integer and float
//! encodings the engine CLIs emit, averaging channels down to mono.

use std::path::Path;

use crate::errors::VoiceBoxError;
use crate::types::AudioClip;

/// Write `clip` to `path` as 16-bit PCM mono.
///
/// Samples are clamped to `-1.0..=1.0` before conversion.
pub fn write_wav(clip: &AudioClip, path: &Path) -> Result<(), VoiceBoxError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let write_err = |source| VoiceBoxError::AudioWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(write_err)?;
    for &sample in &clip.samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value).map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;
    Ok(())
}

/// Read `path` into an [`AudioClip`], averaging multi-channel audio to mono.
pub fn read_wav(path: &Path) -> Result<AudioClip, VoiceBoxError> {
    let read_err = |source| VoiceBoxError::AudioReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(read_err)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(read_err)?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(read_err)?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    Ok(AudioClip::new(samples, spec.sample_rate))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_preserves_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let samples: Vec<f32> = (0..2_400)
            .map(|i| (i as f32 * 0.01).sin() * 0.5)
            .collect();
        let clip = AudioClip::new(samples, 24_000);

        write_wav(&clip, &path).unwrap();
        let back = read_wav(&path).unwrap();

        assert_eq!(back.sample_rate, 24_000);
        assert_eq!(back.samples.len(), clip.samples.len());
        // 16-bit quantization keeps values close but not exact.
        for (a, b) in clip.samples.iter().zip(back.samples.iter()) {
            assert!((a - b).abs() < 1e-3, "sample drifted: {a} vs {b}");
        }
    }

    #[test]
    fn test_write_clamps_out_of_range_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hot.wav");

        let clip = AudioClip::new(vec![2.0, -2.0, 0.0], 16_000);
        write_wav(&clip, &path).unwrap();

        let back = read_wav(&path).unwrap();
        assert!(back.samples[0] > 0.99);
        assert!(back.samples[1] < -0.99);
        assert_eq!(back.samples[2], 0.0);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let result = read_wav(Path::new("definitely/not/here.wav"));
        assert!(matches!(
            result,
            Err(VoiceBoxError::AudioReadFailed { .. })
        ));
    }

    #[test]
    fn test_read_averages_stereo_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..10 {
            writer.write_sample(i16::MAX).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let clip = read_wav(&path).unwrap();
        assert_eq!(clip.samples.len(), 10);
        assert!((clip.samples[0] - 0.5).abs() < 1e-2);
    }
}

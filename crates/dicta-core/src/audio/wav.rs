//! WAV encoding for API upload.

use anyhow::{Context, Result};
use std::io::Cursor;

use super::RecordingData;

/// Encode a mono recording as 16-bit PCM WAV bytes.
pub fn encode_wav(recording: &RecordingData) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: recording.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .context("Failed to create WAV writer")?;
        for &sample in &recording.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer
                .write_sample((clamped * i16::MAX as f32) as i16)
                .context("Failed to write WAV sample")?;
        }
        writer.finalize().context("Failed to finalize WAV data")?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_wav_reads_back() {
        let recording = RecordingData {
            samples: vec![0.0, 0.5, -0.5, 1.0, -1.0],
            sample_rate: 16_000,
        };
        let bytes = encode_wav(&recording).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 5);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let recording = RecordingData {
            samples: vec![2.0, -2.0],
            sample_rate: 8_000,
        };
        let bytes = encode_wav(&recording).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }
}

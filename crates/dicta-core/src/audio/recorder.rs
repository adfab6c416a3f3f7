//! Microphone recorder built on cpal.
//!
//! Samples accumulate in a shared buffer while the stream runs; `stop()`
//! takes the buffer and downmixes it to mono for upload.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Stream errors seen during the current recording (reset on start).
/// ALSA underruns are common on Linux and non-fatal, so they are counted
/// and rate-limit reported rather than propagated.
static STREAM_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

/// A finished recording: mono f32 samples at the capture rate.
#[derive(Debug, Clone)]
pub struct RecordingData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl RecordingData {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Microphone recorder. One recording at a time; `start` then `stop`.
pub struct AudioRecorder {
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
    channels: u16,
    sample_rate: u32,
    started_at: Option<Instant>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self {
            stream: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            channels: 1,
            sample_rate: 0,
            started_at: None,
        }
    }

    /// Begin capturing from the named device, or the system default.
    pub fn start(&mut self, device_name: Option<&str>) -> Result<()> {
        if self.stream.is_some() {
            anyhow::bail!("Recording already in progress");
        }

        super::devices::init_platform();

        let device = find_device(device_name)?;
        let supported = device
            .default_input_config()
            .context("No supported input configuration for this device")?;

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.config();
        self.channels = config.channels;
        self.sample_rate = config.sample_rate;

        STREAM_ERROR_COUNT.store(0, Ordering::Relaxed);
        self.samples.lock().unwrap().clear();

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, self.samples.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, self.samples.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, self.samples.clone()),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, self.samples.clone()),
            other => anyhow::bail!("Unsupported sample format: {other:?}"),
        }?;

        stream.play().context("Failed to start audio stream")?;
        self.stream = Some(stream);
        self.started_at = Some(Instant::now());

        crate::verbose!(
            "Recording at {} Hz, {} channel(s)",
            self.sample_rate,
            self.channels
        );

        Ok(())
    }

    /// Seconds elapsed since `start`, or 0 when idle.
    pub fn elapsed_secs(&self) -> u64 {
        self.started_at
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0)
    }

    /// Stop capturing and return the mono recording.
    pub fn stop(&mut self) -> Result<RecordingData> {
        let stream = self
            .stream
            .take()
            .context("No recording in progress")?;
        drop(stream);
        self.started_at = None;

        let errors = STREAM_ERROR_COUNT.load(Ordering::Relaxed);
        if errors > 0 {
            crate::verbose!("{errors} non-fatal stream errors during recording");
        }

        let raw = std::mem::take(&mut *self.samples.lock().unwrap());
        let samples = downmix_to_mono(&raw, self.channels);

        Ok(RecordingData {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate an input device by description, falling back to the default.
fn find_device(device_name: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();

    if let Some(name) = device_name {
        for device in host.input_devices()? {
            if device.description().map(|d| d.to_string()).as_deref() == Ok(name) {
                return Ok(device);
            }
        }
        anyhow::bail!("Audio input device not found: {name}");
    }

    host.default_input_device()
        .context("No default audio input device")
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let err_fn = |err| {
        let count = STREAM_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
        if count == 0 {
            crate::verbose!(
                "Audio stream error (non-fatal, further errors suppressed): {err}"
            );
        }
    };

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut buf = samples.lock().unwrap();
            buf.extend(data.iter().map(|&s| <f32 as cpal::Sample>::from_sample(s)));
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Average interleaved frames down to a single channel.
fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_frames() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let mono = downmix_to_mono(&stereo, 2);
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn downmix_passes_mono_through() {
        let samples = [0.1, 0.2, 0.3];
        assert_eq!(downmix_to_mono(&samples, 1), samples.to_vec());
    }

    #[test]
    fn recording_duration_from_sample_count() {
        let data = RecordingData {
            samples: vec![0.0; 32_000],
            sample_rate: 16_000,
        };
        assert!((data.duration_secs() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stop_without_start_is_an_error() {
        let mut recorder = AudioRecorder::new();
        assert!(recorder.stop().is_err());
    }
}

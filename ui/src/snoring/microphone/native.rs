//! Native capture through the default `cpal` input device.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BuildStreamError, SampleFormat, Stream};
use tracing::{info, warn};

use super::{CaptureStream, MicrophoneBackend, MicrophoneError};
use crate::snoring::spectrum::SpectrumAnalyser;

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMicrophone;

impl MicrophoneBackend for NativeMicrophone {
    type Stream = NativeCapture;

    async fn acquire(&self, fft_size: usize) -> Result<NativeCapture, MicrophoneError> {
        let analyser = SpectrumAnalyser::new(fft_size)
            .map_err(|error| MicrophoneError::Backend(error.to_string()))?;
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(MicrophoneError::DeviceUnavailable)?;
        let supported = device
            .default_input_config()
            .map_err(|error| MicrophoneError::Backend(format!("input config: {error}")))?;

        let sample_format = supported.sample_format();
        let stream_config = supported.config();
        let channels = usize::from(stream_config.channels.max(1));
        let samples = Arc::new(Mutex::new(SampleWindow::new(fft_size)));

        let error_callback = |error: cpal::StreamError| {
            warn!("microphone stream error: {error}");
        };

        let stream = match sample_format {
            SampleFormat::F32 => {
                let sink = samples.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _| push_frames(&sink, data, channels, |s| s),
                    error_callback,
                    None,
                )
            }
            SampleFormat::I16 => {
                let sink = samples.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _| {
                        push_frames(&sink, data, channels, |s| f32::from(s) / i16::MAX as f32)
                    },
                    error_callback,
                    None,
                )
            }
            SampleFormat::U16 => {
                let sink = samples.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[u16], _| {
                        push_frames(&sink, data, channels, |s| {
                            (f32::from(s) - 32_768.0) / 32_768.0
                        })
                    },
                    error_callback,
                    None,
                )
            }
            _ => return Err(MicrophoneError::Unsupported),
        }
        .map_err(map_build_error)?;

        stream
            .play()
            .map_err(|error| MicrophoneError::Backend(format!("start stream: {error}")))?;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = stream_config.sample_rate.0,
            channels,
            "microphone opened"
        );

        Ok(NativeCapture {
            stream: Some(stream),
            samples,
            analyser,
            scratch: Vec::with_capacity(fft_size),
        })
    }
}

pub struct NativeCapture {
    stream: Option<Stream>,
    samples: Arc<Mutex<SampleWindow>>,
    analyser: SpectrumAnalyser,
    scratch: Vec<f32>,
}

impl CaptureStream for NativeCapture {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn read_frequency_data(&mut self, bins: &mut [u8]) {
        self.scratch.clear();
        if let Ok(window) = self.samples.lock() {
            self.scratch.extend(window.samples.iter().copied());
        }
        self.analyser.byte_frequency_data(&self.scratch, bins);
    }

    fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(error) = stream.pause() {
                warn!("failed to pause microphone stream: {error}");
            }
            drop(stream);
            info!("microphone released");
        }
    }
}

impl Drop for NativeCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Most recent mono samples, at most one analyser window long.
struct SampleWindow {
    capacity: usize,
    samples: VecDeque<f32>,
}

impl SampleWindow {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }
}

fn push_frames<T: Copy>(
    sink: &Mutex<SampleWindow>,
    data: &[T],
    channels: usize,
    to_f32: impl Fn(T) -> f32,
) {
    let Ok(mut window) = sink.lock() else {
        return;
    };
    for frame in data.chunks(channels) {
        let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
        window.push(sum / frame.len() as f32);
    }
}

fn map_build_error(error: BuildStreamError) -> MicrophoneError {
    match error {
        BuildStreamError::DeviceNotAvailable => MicrophoneError::DeviceUnavailable,
        BuildStreamError::StreamConfigNotSupported => MicrophoneError::Unsupported,
        other => MicrophoneError::Backend(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_only_the_latest_samples() {
        let mut window = SampleWindow::new(3);
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(s);
        }
        assert_eq!(window.samples.iter().copied().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn interleaved_frames_are_averaged_to_mono() {
        let sink = Mutex::new(SampleWindow::new(8));
        push_frames(&sink, &[0.5f32, -0.5, 1.0, 0.0], 2, |s| s);
        let window = sink.lock().unwrap();
        assert_eq!(window.samples.iter().copied().collect::<Vec<_>>(), vec![0.0, 0.5]);
    }

    #[test]
    fn integer_samples_are_normalised() {
        let sink = Mutex::new(SampleWindow::new(4));
        push_frames(&sink, &[i16::MAX, 0], 1, |s| f32::from(s) / i16::MAX as f32);
        let window = sink.lock().unwrap();
        assert_eq!(window.samples.iter().copied().collect::<Vec<_>>(), vec![1.0, 0.0]);
    }
}

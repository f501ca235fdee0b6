//! Browser capture through `getUserMedia` and a Web Audio `AnalyserNode`.

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AnalyserNode, AudioContext, DomException, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

use super::{CaptureStream, MicrophoneBackend, MicrophoneError};

#[derive(Debug, Clone, Copy, Default)]
pub struct WebMicrophone;

impl MicrophoneBackend for WebMicrophone {
    type Stream = WebCapture;

    async fn acquire(&self, fft_size: usize) -> Result<WebCapture, MicrophoneError> {
        let window = web_sys::window().ok_or(MicrophoneError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| MicrophoneError::Unsupported)?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let request = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(classify)?;
        let stream: MediaStream = JsFuture::from(request)
            .await
            .map_err(classify)?
            .dyn_into()
            .map_err(|_| MicrophoneError::Backend("getUserMedia returned no stream".into()))?;

        match open_pipeline(&stream, fft_size) {
            Ok((context, analyser)) => {
                info!(fft_size, "microphone opened");
                Ok(WebCapture {
                    stream,
                    context,
                    analyser,
                    released: false,
                })
            }
            Err(err) => {
                stop_tracks(&stream);
                Err(err)
            }
        }
    }
}

pub struct WebCapture {
    stream: MediaStream,
    context: AudioContext,
    analyser: AnalyserNode,
    released: bool,
}

impl CaptureStream for WebCapture {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_frequency_data(&mut self, bins: &mut [u8]) {
        if !self.released {
            self.analyser.get_byte_frequency_data(bins);
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        stop_tracks(&self.stream);
        if let Err(err) = self.context.close() {
            warn!("failed to close audio context: {err:?}");
        }
        info!("microphone released");
    }
}

impl Drop for WebCapture {
    fn drop(&mut self) {
        self.release();
    }
}

fn open_pipeline(
    stream: &MediaStream,
    fft_size: usize,
) -> Result<(AudioContext, AnalyserNode), MicrophoneError> {
    let context = AudioContext::new().map_err(|_| MicrophoneError::Unsupported)?;
    let wired = (|| -> Result<AnalyserNode, JsValue> {
        let source = context.create_media_stream_source(stream)?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(fft_size as u32);
        source.connect_with_audio_node(&analyser)?;
        Ok(analyser)
    })();

    match wired {
        Ok(analyser) => Ok((context, analyser)),
        Err(err) => {
            let _ = context.close();
            Err(classify(err))
        }
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn classify(err: JsValue) -> MicrophoneError {
    let Some(exception) = err.dyn_ref::<DomException>() else {
        return MicrophoneError::Backend(format!("{err:?}"));
    };
    match exception.name().as_str() {
        "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
            MicrophoneError::PermissionDenied
        }
        "NotFoundError" | "OverconstrainedError" | "DevicesNotFoundError" => {
            MicrophoneError::DeviceUnavailable
        }
        "NotReadableError" | "AbortError" | "TrackStartError" => MicrophoneError::DeviceBusy,
        "NotSupportedError" | "TypeError" => MicrophoneError::Unsupported,
        name => MicrophoneError::Backend(format!("{name}: {}", exception.message())),
    }
}

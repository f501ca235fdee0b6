//! Microphone acquisition behind a small capture interface.
//!
//! The detector only needs two things from a platform: a byte frequency
//! buffer per frame, and a way to give the device back.

use std::future::Future;

use futures::future::LocalBoxFuture;
use futures_channel::oneshot;
use tracing::debug;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{NativeCapture, NativeMicrophone};
#[cfg(target_arch = "wasm32")]
pub use web::{WebCapture, WebMicrophone};

/// Microphone backend for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformMicrophone = NativeMicrophone;
#[cfg(target_arch = "wasm32")]
pub type PlatformMicrophone = WebMicrophone;

/// Failure to open the microphone. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MicrophoneError {
    #[error("microphone permission was denied")]
    PermissionDenied,
    #[error("no microphone is available")]
    DeviceUnavailable,
    #[error("the microphone is in use by another application")]
    DeviceBusy,
    #[error("microphone capture is not supported here")]
    Unsupported,
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// A live, analysed audio stream.
pub trait CaptureStream {
    /// Length of the buffer `read_frequency_data` fills.
    fn bin_count(&self) -> usize;

    /// Copy the current byte frequency spectrum into `bins`.
    fn read_frequency_data(&mut self, bins: &mut [u8]);

    /// Stop the device and tear down the analysis pipeline. Idempotent.
    fn release(&mut self);
}

#[allow(async_fn_in_trait)]
pub trait MicrophoneBackend {
    type Stream: CaptureStream;

    /// Ask for microphone access and open an analyser with `fft_size`.
    async fn acquire(&self, fft_size: usize) -> Result<Self::Stream, MicrophoneError>;
}

/// Run `acquire` on a task of its own and wait for its result.
///
/// Dropping the returned future does not abandon the request: a stream
/// granted after the caller is gone is released on arrival.
pub fn acquire_detached<S, F>(
    acquire: F,
    spawn: impl FnOnce(LocalBoxFuture<'static, ()>),
) -> impl Future<Output = Result<S, MicrophoneError>>
where
    S: CaptureStream + 'static,
    F: Future<Output = Result<S, MicrophoneError>> + 'static,
{
    let (tx, rx) = oneshot::channel();
    spawn(Box::pin(async move {
        if let Err(Ok(mut stream)) = tx.send(acquire.await) {
            debug!("microphone granted after its request was dropped, releasing");
            stream.release();
        }
    }));
    async move {
        rx.await
            .unwrap_or_else(|_| Err(MicrophoneError::Backend("acquisition task dropped".into())))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording test double for acquire/release balance.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{CaptureStream, MicrophoneBackend, MicrophoneError};

    #[derive(Debug, Default)]
    pub struct Ledger {
        pub acquired: u32,
        pub released: u32,
        pub reads: u32,
    }

    impl Ledger {
        pub fn outstanding(&self) -> u32 {
            self.acquired - self.released
        }
    }

    #[derive(Clone, Default)]
    pub struct FakeMicrophone {
        pub ledger: Rc<RefCell<Ledger>>,
        /// Per-frame mean levels served to every stream, in order.
        pub levels: Rc<RefCell<VecDeque<u8>>>,
        pub deny_with: Rc<RefCell<Option<MicrophoneError>>>,
    }

    impl FakeMicrophone {
        pub fn with_levels(levels: &[u8]) -> Self {
            let mic = Self::default();
            mic.levels.borrow_mut().extend(levels.iter().copied());
            mic
        }

        pub fn denying(err: MicrophoneError) -> Self {
            let mic = Self::default();
            mic.deny_with.replace(Some(err));
            mic
        }

        pub fn push_levels(&self, levels: &[u8]) {
            self.levels.borrow_mut().extend(levels.iter().copied());
        }

        /// Synchronous acquire for state-machine tests.
        pub fn open(&self, fft_size: usize) -> Result<FakeStream, MicrophoneError> {
            if let Some(err) = self.deny_with.borrow().clone() {
                return Err(err);
            }
            self.ledger.borrow_mut().acquired += 1;
            Ok(FakeStream {
                bins: fft_size / 2,
                ledger: self.ledger.clone(),
                levels: self.levels.clone(),
                released: false,
            })
        }
    }

    impl MicrophoneBackend for FakeMicrophone {
        type Stream = FakeStream;

        async fn acquire(&self, fft_size: usize) -> Result<FakeStream, MicrophoneError> {
            self.open(fft_size)
        }
    }

    pub struct FakeStream {
        bins: usize,
        ledger: Rc<RefCell<Ledger>>,
        levels: Rc<RefCell<VecDeque<u8>>>,
        released: bool,
    }

    impl CaptureStream for FakeStream {
        fn bin_count(&self) -> usize {
            self.bins
        }

        fn read_frequency_data(&mut self, bins: &mut [u8]) {
            self.ledger.borrow_mut().reads += 1;
            let level = self.levels.borrow_mut().pop_front().unwrap_or(0);
            bins.fill(level);
        }

        fn release(&mut self) {
            if !self.released {
                self.released = true;
                self.ledger.borrow_mut().released += 1;
            }
        }
    }

    impl Drop for FakeStream {
        fn drop(&mut self) {
            self.release();
        }
    }
}

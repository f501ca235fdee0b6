//! Microphone-based snoring detection.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod microphone;
pub mod spectrum;
pub mod task;
mod view;

pub use config::{CountRetention, SnoringConfig};
pub use engine::{DetectorPhase, SnoringEngine, SnoringEvent, SnoringSession};
pub use microphone::{CaptureStream, MicrophoneBackend, MicrophoneError, PlatformMicrophone};
pub use view::{use_snoring_tracker, SnoringPanel, SnoringTracker};

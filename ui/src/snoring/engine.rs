//! Snoring tracker state machine.
//!
//! `Idle → Requesting → Active → Idle`. Acquisition is asynchronous, so
//! starting is split into `begin_start` (hand out an attempt token) and
//! `complete_start` (hand the stream back). A stream that arrives for an
//! attempt that was stopped in the meantime is released on the spot.

use tracing::{debug, info, warn};

use super::analysis::{mean_magnitude, Edge, EdgeDetector};
use super::config::{CountRetention, SnoringConfig};
use super::microphone::{CaptureStream, MicrophoneError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorPhase {
    Idle,
    Requesting { attempt: u64 },
    Active,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnoringSession {
    pub is_snoring: bool,
    pub snoring_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnoringEvent {
    TrackingStarted,
    SnoringDetected { count: u32 },
    MicrophoneError(MicrophoneError),
}

pub struct SnoringEngine<S: CaptureStream> {
    config: SnoringConfig,
    phase: DetectorPhase,
    session: SnoringSession,
    edges: EdgeDetector,
    stream: Option<S>,
    bins: Vec<u8>,
    level: f32,
    next_attempt: u64,
}

impl<S: CaptureStream> SnoringEngine<S> {
    /// An invalid `config` is replaced by the defaults.
    pub fn new(config: SnoringConfig) -> Self {
        let config = config.validated();
        Self {
            config,
            phase: DetectorPhase::Idle,
            session: SnoringSession::default(),
            edges: EdgeDetector::new(config.threshold),
            stream: None,
            bins: Vec::new(),
            level: 0.0,
            next_attempt: 0,
        }
    }

    pub fn config(&self) -> &SnoringConfig {
        &self.config
    }

    pub fn phase(&self) -> DetectorPhase {
        self.phase
    }

    pub fn session(&self) -> SnoringSession {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.phase == DetectorPhase::Active
    }

    pub fn is_busy(&self) -> bool {
        self.phase != DetectorPhase::Idle
    }

    /// Mean spectrum level of the latest sample (0-255).
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Move to `Requesting`. Returns `None` unless currently idle.
    pub fn begin_start(&mut self) -> Option<u64> {
        if self.phase != DetectorPhase::Idle {
            return None;
        }
        self.next_attempt = self.next_attempt.wrapping_add(1);
        let attempt = self.next_attempt;
        self.phase = DetectorPhase::Requesting { attempt };
        debug!(attempt, "requesting microphone");
        Some(attempt)
    }

    /// Deliver the outcome of an acquisition started with `begin_start`.
    pub fn complete_start(
        &mut self,
        attempt: u64,
        outcome: Result<S, MicrophoneError>,
    ) -> Option<SnoringEvent> {
        let current = self.phase == DetectorPhase::Requesting { attempt };

        match outcome {
            Ok(mut stream) if !current => {
                debug!(attempt, "discarding stale microphone grant");
                stream.release();
                None
            }
            Ok(stream) => {
                if self.config.count_retention == CountRetention::PerSession {
                    self.session.snoring_count = 0;
                }
                self.session.is_snoring = false;
                self.edges.reset();
                self.level = 0.0;
                self.bins.clear();
                self.bins.resize(stream.bin_count(), 0);
                self.stream = Some(stream);
                self.phase = DetectorPhase::Active;
                info!(bins = self.bins.len(), "snoring tracking started");
                Some(SnoringEvent::TrackingStarted)
            }
            Err(err) if !current => {
                debug!(attempt, %err, "ignoring stale microphone failure");
                None
            }
            Err(err) => {
                warn!(%err, "microphone unavailable");
                self.phase = DetectorPhase::Idle;
                Some(SnoringEvent::MicrophoneError(err))
            }
        }
    }

    /// Sample one frame. Only does work while `Active`.
    pub fn tick(&mut self) -> Option<SnoringEvent> {
        if self.phase != DetectorPhase::Active {
            return None;
        }
        let stream = self.stream.as_mut()?;
        stream.read_frequency_data(&mut self.bins);
        self.level = mean_magnitude(&self.bins);

        match self.edges.observe(self.level) {
            Some(Edge::Rising) => {
                self.session.snoring_count = self.session.snoring_count.saturating_add(1);
                self.session.is_snoring = true;
                debug!(count = self.session.snoring_count, level = self.level, "snoring edge");
                Some(SnoringEvent::SnoringDetected {
                    count: self.session.snoring_count,
                })
            }
            Some(Edge::Falling) => {
                self.session.is_snoring = false;
                None
            }
            None => None,
        }
    }

    /// Release the microphone and return to `Idle`. The count is kept.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
        if self.phase != DetectorPhase::Idle {
            info!(count = self.session.snoring_count, "snoring tracking stopped");
        }
        self.phase = DetectorPhase::Idle;
        self.session.is_snoring = false;
        self.edges.reset();
        self.level = 0.0;
    }
}

impl<S: CaptureStream> Default for SnoringEngine<S> {
    fn default() -> Self {
        Self::new(SnoringConfig::default())
    }
}

impl<S: CaptureStream> Drop for SnoringEngine<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snoring::microphone::fake::{FakeMicrophone, FakeStream};

    fn active(mic: &FakeMicrophone, config: SnoringConfig) -> SnoringEngine<FakeStream> {
        let mut engine = SnoringEngine::new(config);
        let attempt = engine.begin_start().unwrap();
        let event = engine.complete_start(attempt, mic.open(config.fft_size));
        assert_eq!(event, Some(SnoringEvent::TrackingStarted));
        engine
    }

    #[test]
    fn invalid_fft_size_never_reaches_the_backend() {
        let engine: SnoringEngine<FakeStream> = SnoringEngine::new(SnoringConfig {
            fft_size: 2000,
            ..SnoringConfig::default()
        });
        assert_eq!(engine.config().fft_size, 2048);
        assert_eq!(engine.config().bin_count(), 1024);
    }

    #[test]
    fn phases_follow_start_and_stop() {
        let mic = FakeMicrophone::default();
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        assert_eq!(engine.phase(), DetectorPhase::Idle);

        let attempt = engine.begin_start().unwrap();
        assert_eq!(engine.phase(), DetectorPhase::Requesting { attempt });
        assert_eq!(engine.begin_start(), None);

        engine.complete_start(attempt, mic.open(2048));
        assert!(engine.is_active());
        engine.stop();
        assert_eq!(engine.phase(), DetectorPhase::Idle);
    }

    #[test]
    fn counts_one_per_rising_edge() {
        let mic = FakeMicrophone::with_levels(&[0, 40, 40, 40, 10, 30, 29, 255]);
        let mut engine = active(&mic, SnoringConfig::default());

        let mut counts = Vec::new();
        let mut last = 0;
        for _ in 0..8 {
            if let Some(SnoringEvent::SnoringDetected { count }) = engine.tick() {
                counts.push(count);
            }
            let now = engine.session().snoring_count;
            assert!(now >= last);
            last = now;
        }
        assert_eq!(counts, vec![1, 2, 3]);
        assert!(engine.session().is_snoring);
    }

    #[test]
    fn sustained_loudness_counts_once() {
        let mic = FakeMicrophone::with_levels(&[200; 50]);
        let mut engine = active(&mic, SnoringConfig::default());
        for _ in 0..50 {
            engine.tick();
        }
        assert_eq!(engine.session().snoring_count, 1);
        assert!(engine.session().is_snoring);
    }

    #[test]
    fn falling_edge_clears_snoring_flag() {
        let mic = FakeMicrophone::with_levels(&[90, 5]);
        let mut engine = active(&mic, SnoringConfig::default());
        engine.tick();
        assert!(engine.session().is_snoring);
        assert_eq!(engine.tick(), None);
        assert!(!engine.session().is_snoring);
        assert_eq!(engine.session().snoring_count, 1);
    }

    #[test]
    fn tick_is_inert_when_not_active() {
        let mic = FakeMicrophone::with_levels(&[99]);
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        assert_eq!(engine.tick(), None);
        assert_eq!(mic.ledger.borrow().reads, 0);
    }

    #[test]
    fn stop_releases_and_keeps_count() {
        let mic = FakeMicrophone::with_levels(&[90]);
        let mut engine = active(&mic, SnoringConfig::default());
        engine.tick();
        engine.stop();

        assert_eq!(mic.ledger.borrow().outstanding(), 0);
        assert!(!engine.session().is_snoring);
        assert_eq!(engine.session().snoring_count, 1);
        engine.stop();
        assert_eq!(mic.ledger.borrow().released, 1);
    }

    #[test]
    fn acquire_and_release_balance_across_cycles() {
        let mic = FakeMicrophone::default();
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        for cycle in 1..=3 {
            let attempt = engine.begin_start().unwrap();
            engine.complete_start(attempt, mic.open(2048));
            assert_eq!(mic.ledger.borrow().outstanding(), 1);
            engine.stop();
            let ledger = mic.ledger.borrow();
            assert_eq!((ledger.acquired, ledger.released), (cycle, cycle));
        }
    }

    #[test]
    fn dropping_an_active_engine_releases_the_stream() {
        let mic = FakeMicrophone::default();
        let engine = active(&mic, SnoringConfig::default());
        drop(engine);
        assert_eq!(mic.ledger.borrow().outstanding(), 0);
    }

    #[test]
    fn per_session_count_resets_on_restart() {
        let mic = FakeMicrophone::with_levels(&[90]);
        let mut engine = active(&mic, SnoringConfig::default());
        engine.tick();
        engine.stop();
        assert_eq!(engine.session().snoring_count, 1);

        let attempt = engine.begin_start().unwrap();
        engine.complete_start(attempt, mic.open(2048));
        assert_eq!(engine.session().snoring_count, 0);
    }

    #[test]
    fn cumulative_count_survives_restart() {
        let config = SnoringConfig {
            count_retention: CountRetention::Cumulative,
            ..SnoringConfig::default()
        };
        let mic = FakeMicrophone::with_levels(&[90]);
        let mut engine = active(&mic, config);
        engine.tick();
        engine.stop();

        mic.push_levels(&[90]);
        let attempt = engine.begin_start().unwrap();
        engine.complete_start(attempt, mic.open(2048));
        engine.tick();
        assert_eq!(engine.session().snoring_count, 2);
    }

    #[test]
    fn denial_returns_to_idle_with_error() {
        let mic = FakeMicrophone::denying(MicrophoneError::PermissionDenied);
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        let attempt = engine.begin_start().unwrap();
        let event = engine.complete_start(attempt, mic.open(2048));
        assert_eq!(
            event,
            Some(SnoringEvent::MicrophoneError(MicrophoneError::PermissionDenied))
        );
        assert_eq!(engine.phase(), DetectorPhase::Idle);
        assert_eq!(mic.ledger.borrow().acquired, 0);
    }

    #[test]
    fn grant_after_stop_is_released_immediately() {
        let mic = FakeMicrophone::default();
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        let attempt = engine.begin_start().unwrap();
        engine.stop();

        assert_eq!(engine.complete_start(attempt, mic.open(2048)), None);
        assert_eq!(engine.phase(), DetectorPhase::Idle);
        assert_eq!(mic.ledger.borrow().outstanding(), 0);
    }

    #[test]
    fn stale_grant_does_not_hijack_a_newer_request() {
        let mic = FakeMicrophone::default();
        let mut engine: SnoringEngine<FakeStream> = SnoringEngine::default();
        let first = engine.begin_start().unwrap();
        engine.stop();
        let second = engine.begin_start().unwrap();

        assert_eq!(engine.complete_start(first, mic.open(2048)), None);
        assert_eq!(engine.phase(), DetectorPhase::Requesting { attempt: second });
        assert_eq!(
            engine.complete_start(second, mic.open(2048)),
            Some(SnoringEvent::TrackingStarted)
        );
        engine.stop();
        assert_eq!(mic.ledger.borrow().outstanding(), 0);
    }
}

use std::ops::ControlFlow;

use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::components::toasts::post_notice;
use crate::core::notice::{Notice, NoticeBoard};
use crate::core::timing;
use crate::t;

use super::engine::{DetectorPhase, SnoringEngine};
use super::microphone::{acquire_detached, MicrophoneBackend, PlatformMicrophone};
use super::task::{sampling_loop, SamplingHandle};
use super::{SnoringConfig, SnoringEvent};

type PlatformEngine = SnoringEngine<<PlatformMicrophone as MicrophoneBackend>::Stream>;

/// Tracker state owned by the scope that called [`use_snoring_tracker`].
///
/// Lives above the locale-keyed subtree, so switching language neither
/// stops tracking nor clears the count.
#[derive(Clone, Copy)]
pub struct SnoringTracker {
    engine: Signal<PlatformEngine>,
    sampler: Signal<Option<SamplingHandle>>,
    commands: Coroutine<TrackerCommand>,
}

#[derive(Debug, Clone)]
enum TrackerCommand {
    Start,
}

impl SnoringTracker {
    pub fn toggle(&self) {
        if self.engine.read().is_busy() {
            self.stop();
        } else {
            self.commands.send(TrackerCommand::Start);
        }
    }

    /// Cancel the frame loop first, then hand the device back.
    pub fn stop(&self) {
        let mut sampler = self.sampler;
        let mut engine = self.engine;
        sampler.set(None);
        engine.with_mut(|eng| eng.stop());
    }
}

/// Create the tracker in the calling scope and provide it as context.
///
/// Notices go to `board`. Everything is released when that scope drops,
/// including a microphone grant that is still pending.
pub fn use_snoring_tracker(config: SnoringConfig, board: Signal<NoticeBoard>) -> SnoringTracker {
    let engine = use_signal(|| PlatformEngine::new(config));
    let sampler = use_signal(|| Option::<SamplingHandle>::None);

    let commands = use_coroutine(move |mut rx: UnboundedReceiver<TrackerCommand>| {
        let mut engine_signal = engine;
        let mut sampler_signal = sampler;

        async move {
            let backend = PlatformMicrophone::default();
            while let Some(command) = rx.next().await {
                match command {
                    TrackerCommand::Start => {
                        let Some(attempt) = engine_signal.with_mut(|eng| eng.begin_start()) else {
                            continue;
                        };
                        let fft_size = engine_signal.with(|eng| eng.config().fft_size);
                        let outcome = acquire_detached(
                            async move { backend.acquire(fft_size).await },
                            |task| {
                                spawn_forever(task);
                            },
                        )
                        .await;
                        let event = engine_signal.with_mut(|eng| eng.complete_start(attempt, outcome));

                        if let Some(event) = event {
                            let started = event == SnoringEvent::TrackingStarted;
                            post_notice(board, Notice::from_event(&event));
                            if started {
                                sampler_signal.set(Some(start_sampling(engine_signal, board)));
                            }
                        }
                    }
                }
            }
        }
    });

    use_drop(move || {
        let mut sampler = sampler;
        let mut engine = engine;
        if let Ok(mut handle) = sampler.try_write() {
            handle.take();
        }
        if let Ok(mut eng) = engine.try_write() {
            eng.stop();
        };
    });

    use_context_provider(|| SnoringTracker {
        engine,
        sampler,
        commands,
    })
}

#[component]
pub fn SnoringPanel() -> Element {
    let tracker = use_context::<SnoringTracker>();

    let (phase, session, level, threshold) = {
        let eng = tracker.engine.read();
        (eng.phase(), eng.session(), eng.level(), eng.config().threshold)
    };

    let button_label = match phase {
        DetectorPhase::Idle => t!("tracking-start"),
        DetectorPhase::Requesting { .. } => t!("tracking-requesting"),
        DetectorPhase::Active => t!("tracking-stop"),
    };
    let (status_class, status_label) = match phase {
        DetectorPhase::Active if session.is_snoring => {
            ("snoring-status--snoring", t!("snoring-status-snoring"))
        }
        DetectorPhase::Active => ("snoring-status--quiet", t!("snoring-status-quiet")),
        _ => ("snoring-status--idle", t!("snoring-status-idle")),
    };
    let toggle_class = if phase == DetectorPhase::Active {
        "button button--accent tracking__toggle"
    } else {
        "button button--primary tracking__toggle"
    };
    let count_label = t!("snoring-count", count = session.snoring_count);
    let level_pct = (level / 255.0 * 100.0).clamp(0.0, 100.0);
    let threshold_pct = f32::from(threshold) / 255.0 * 100.0;

    rsx! {
        section { class: "card tracking",
            h2 { class: "tracking__heading", {t!("tracking-heading")} }
            p { class: "tracking__intro", {t!("tracking-intro")} }

            button {
                r#type: "button",
                class: "{toggle_class}",
                onclick: move |_| tracker.toggle(),
                "{button_label}"
            }

            div { class: "snoring-status {status_class}",
                span { class: "snoring-status__dot", aria_hidden: "true" }
                span { class: "snoring-status__label", "{status_label}" }
                span { class: "snoring-status__count", "{count_label}" }
            }

            if phase == DetectorPhase::Active {
                div {
                    class: "snoring-meter",
                    role: "meter",
                    aria_label: t!("snoring-level"),
                    aria_valuemin: "0",
                    aria_valuemax: "255",
                    aria_valuenow: "{level:.0}",
                    div { class: "snoring-meter__fill", style: "width: {level_pct:.1}%" }
                    div { class: "snoring-meter__threshold", style: "left: {threshold_pct:.1}%" }
                }
            }
        }
    }
}

fn start_sampling(
    mut engine: Signal<PlatformEngine>,
    board: Signal<NoticeBoard>,
) -> SamplingHandle {
    let (handle, task) = sampling_loop(timing::next_frame, move || {
        let (event, active) = engine.with_mut(|eng| (eng.tick(), eng.is_active()));
        if let Some(event) = event {
            post_notice(board, Notice::from_event(&event));
        }
        if active {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    });
    spawn(task);
    handle
}

use dioxus::prelude::*;

use crate::components::{SleepCard, Toasts};
use crate::core::format;
use crate::core::platform::Platform;
use crate::sleep::{FieldKind, SleepLog};
use crate::snoring::SnoringPanel;

#[cfg(debug_assertions)]
fn log_home_render(lang: &str) {
    // Lightweight render trace for diagnosing i18n refresh issues.
    println!("[i18n] Home render (lang_marker={lang})");
}

/// The sleep tracker page: cards, tracking toggle, tips and quality.
///
/// Needs [`use_sleepwell_state`](super::use_sleepwell_state) in an ancestor.
#[component]
pub fn Home() -> Element {
    // Subscribe to global language code (if provided) so we re-render on change.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());

    #[cfg(debug_assertions)]
    {
        log_home_render(&_lang_current);
    }

    use_hook(|| {
        let platform = Platform::current();
        tracing::info!(
            platform = platform.label(),
            display_refresh = platform.has_display_refresh(),
            "tracker page mounted"
        );
    });

    let log = use_context::<Signal<SleepLog>>();
    let quality = format::format_percent(log.read().quality_percent());

    rsx! {
        section { class: "page page-home",
            div { class: "hero",
                div { class: "hero__moon", aria_hidden: "true", "☾" }
                h1 { {crate::t!("app-title")} }
                p { class: "hero__tagline", {crate::t!("app-tagline")} }
            }

            div { class: "sleep-cards",
                for kind in FieldKind::ALL {
                    SleepCard { key: "{kind.slug()}", kind, log }
                }
            }

            SnoringPanel {}

            div { class: "page-home__extras",
                section { class: "card tips",
                    h3 { {crate::t!("tips-heading")} }
                    ul { class: "tips__list",
                        li { {crate::t!("tip-routine")} }
                        li { {crate::t!("tip-screens")} }
                        li { {crate::t!("tip-environment")} }
                    }
                }
                section { class: "card quality",
                    h3 { {crate::t!("quality-heading")} }
                    div { class: "quality__value", "{quality}" }
                    p { class: "quality__caption", {crate::t!("quality-caption")} }
                }
            }

            Toasts {}
        }
    }
}

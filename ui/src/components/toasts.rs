use dioxus::prelude::*;

use crate::core::notice::{Notice, NoticeBoard, NOTICE_TTL_MS};
use crate::core::timing;
use crate::t;

/// Show a toast and schedule its dismissal.
///
/// Must be called from inside a Dioxus scope (event handler, coroutine or task).
pub fn post_notice(mut board: Signal<NoticeBoard>, notice: Notice) {
    tracing::debug!(title = %notice.title, "notice posted");
    let id = board.with_mut(|b| b.push(notice));
    spawn(async move {
        timing::sleep_ms(NOTICE_TTL_MS).await;
        board.with_mut(|b| b.dismiss(id));
    });
}

/// Toast stack. Reads the `Signal<NoticeBoard>` provided by the page.
#[component]
pub fn Toasts() -> Element {
    let mut board = use_context::<Signal<NoticeBoard>>();
    let items = board.read().items().to_vec();
    let dismiss_label = t!("toast-dismiss");

    rsx! {
        div { class: "toasts", role: "status", aria_live: "polite",
            for notice in items {
                div {
                    key: "{notice.id}",
                    class: "toast {notice.kind.css_modifier()}",
                    div { class: "toast__body",
                        strong { class: "toast__title", "{notice.title}" }
                        p { class: "toast__description", "{notice.description}" }
                    }
                    button {
                        r#type: "button",
                        class: "toast__close",
                        aria_label: "{dismiss_label}",
                        onclick: move |_| {
                            board.with_mut(|b| b.dismiss(notice.id));
                        },
                        "×"
                    }
                }
            }
        }
    }
}

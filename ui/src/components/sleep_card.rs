use dioxus::prelude::*;

use crate::sleep::clock::{hour_options, minute_options};
use crate::sleep::duration::{MAX_EDIT_HOURS, MIN_EDIT_HOURS};
use crate::sleep::{ClockTime, EditAffordance, FieldEdit, FieldKind, SleepField, SleepLog};
use crate::t;

#[component]
pub fn SleepCard(kind: FieldKind, log: Signal<SleepLog>) -> Element {
    let field = log.read().field(kind);
    let overridden = kind == FieldKind::Duration && log.read().duration_overridden();

    let title = match kind {
        FieldKind::SleepTime => t!("card-sleep-title"),
        FieldKind::WakeTime => t!("card-wake-title"),
        FieldKind::Duration => t!("card-duration-title"),
    };
    let value = field.display_value();
    let unit = (kind == FieldKind::Duration).then(|| t!("card-duration-unit"));

    rsx! {
        article { class: "sleep-card sleep-card--{kind.slug()}",
            div { class: "sleep-card__header",
                span { class: "sleep-card__icon", aria_hidden: "true", "{kind.glyph()}" }
                div {
                    p { class: "sleep-card__title", "{title}" }
                    p { class: "sleep-card__value",
                        "{value}"
                        if let Some(unit) = unit {
                            span { class: "sleep-card__unit", " {unit}" }
                        }
                    }
                }
            }

            {match field.affordance() {
                EditAffordance::DualSelector => rsx! {
                    ClockSelectors { kind, field, log }
                },
                EditAffordance::Stepper => rsx! {
                    DurationStepper { field, log }
                },
                EditAffordance::ReadOnly => rsx! {},
            }}

            if overridden {
                p { class: "sleep-card__hint", {t!("card-duration-adjusted")} }
            }
        }
    }
}

#[component]
fn ClockSelectors(kind: FieldKind, field: SleepField, log: Signal<SleepLog>) -> Element {
    let current = field.clock().unwrap_or_default();
    let hour_id = format!("{}-hour", kind.slug());
    let minute_id = format!("{}-minute", kind.slug());

    let mut apply_clock = move |next: Option<ClockTime>| {
        if let Some(next) = next {
            log.with_mut(|l| l.apply(kind, FieldEdit::SetClock(next)));
        }
    };

    rsx! {
        div { class: "sleep-card__controls",
            label { class: "visually-hidden", r#for: "{hour_id}", {t!("card-hour-label")} }
            select {
                id: "{hour_id}",
                class: "sleep-card__select",
                value: "{current.hour()}",
                oninput: move |evt: FormEvent| {
                    let next = evt.value().parse::<u8>().ok().and_then(|h| current.with_hour(h).ok());
                    apply_clock(next);
                },
                for hour in hour_options() {
                    option { key: "{hour}", value: "{hour}", selected: hour == current.hour(), "{hour:02}" }
                }
            }
            span { class: "sleep-card__separator", ":" }
            label { class: "visually-hidden", r#for: "{minute_id}", {t!("card-minute-label")} }
            select {
                id: "{minute_id}",
                class: "sleep-card__select",
                value: "{current.minute()}",
                oninput: move |evt: FormEvent| {
                    let next = evt.value().parse::<u8>().ok().and_then(|m| current.with_minute(m).ok());
                    apply_clock(next);
                },
                for minute in minute_options() {
                    option { key: "{minute}", value: "{minute}", selected: minute == current.minute(), "{minute:02}" }
                }
            }
        }
    }
}

#[component]
fn DurationStepper(field: SleepField, log: Signal<SleepLog>) -> Element {
    let current = field.duration().unwrap_or_default();
    let whole_hours = current.as_whole_hours();

    rsx! {
        div { class: "sleep-card__controls sleep-card__controls--stepper",
            button {
                r#type: "button",
                class: "button button--ghost sleep-card__step",
                aria_label: t!("card-duration-decrease"),
                disabled: !current.can_step(-1),
                onclick: move |_| {
                    log.with_mut(|l| l.apply(FieldKind::Duration, FieldEdit::Step(-1)));
                },
                "−"
            }
            select {
                class: "sleep-card__select",
                value: whole_hours.map(|h| h.to_string()).unwrap_or_default(),
                oninput: move |evt: FormEvent| {
                    if let Ok(hours) = evt.value().parse::<i32>() {
                        log.with_mut(|l| l.apply(FieldKind::Duration, FieldEdit::SetHours(hours)));
                    }
                },
                if whole_hours.is_none() {
                    option { key: "current", value: "", disabled: true, selected: true, "{current}" }
                }
                for hours in MIN_EDIT_HOURS..=MAX_EDIT_HOURS {
                    option { key: "{hours}", value: "{hours}", selected: whole_hours == Some(hours), "{hours}" }
                }
            }
            button {
                r#type: "button",
                class: "button button--ghost sleep-card__step",
                aria_label: t!("card-duration-increase"),
                disabled: !current.can_step(1),
                onclick: move |_| {
                    log.with_mut(|l| l.apply(FieldKind::Duration, FieldEdit::Step(1)));
                },
                "+"
            }
        }
    }
}

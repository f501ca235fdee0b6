#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that CSS selectors the shared components emit (sleep cards, the tracking
  panel, toasts) remain present in the unified shared theme: ui/assets/theme/main.css
- Fail fast if a refactor drops or renames a class, instead of shipping a silently
  unstyled desktop build.

How it works:
- The theme is embedded with `include_str!` from the shared `ui/` location (mirrors the
  constant in `desktop/src/main.rs`) and checked for a curated set of selectors.
- If you intentionally rename or remove a selector, update the component markup and
  REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".card {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Hero
    ".hero__moon",
    ".hero__tagline",
    // Sleep cards
    ".sleep-cards",
    ".sleep-card {",
    ".sleep-card__icon",
    ".sleep-card__value",
    ".sleep-card__select",
    ".sleep-card__controls--stepper",
    ".sleep-card__hint",
    // Tracking panel
    ".tracking__toggle",
    ".snoring-status--quiet",
    ".snoring-status--snoring",
    ".snoring-meter__fill",
    ".snoring-meter__threshold",
    // Tips & quality
    ".tips__list",
    ".quality__value",
    // Toasts
    ".toasts",
    ".toast--info",
    ".toast--accent",
    ".toast--error",
    ".toast__close",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn snoring_status_modifiers_are_paired() {
    // Every status modifier the tracking panel can emit must be styled.
    for modifier in ["idle", "quiet", "snoring"] {
        let selector = format!(".snoring-status--{modifier}");
        assert!(
            THEME_CSS.contains(&selector),
            "Tracking status selector `{selector}` missing"
        );
    }
}

use std::collections::{BTreeMap, BTreeSet};

/// Locale parity checks against the fallback (en-US) `sleepwell-ui.ftl`.
///
/// Every locale must define every fallback message, and each message must use
/// the same `{ $variable }` placeables; a translated toast that drops `$count`
/// would otherwise render without the number at runtime.
///
/// To add a locale, create `ui/i18n/<locale>/sleepwell-ui.ftl` and register it
/// in `LOCALES` below.
const EN_US: &str = include_str!("../i18n/en-US/sleepwell-ui.ftl");
const ZH_CN: &str = include_str!("../i18n/zh-CN/sleepwell-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("zh-CN", ZH_CN)];

/// Message id → sorted variable names, from a simple line scan.
fn messages(src: &str, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out = BTreeMap::new();

    for (line_no, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
            continue;
        }
        let Some((id, body)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        let previous = out.insert(id.to_string(), variables(body));
        assert!(
            previous.is_none(),
            "{locale}: duplicate message `{id}` on line {}",
            line_no + 1
        );
    }

    out
}

fn variables(body: &str) -> BTreeSet<String> {
    body.split('$')
        .skip(1)
        .filter_map(|rest| {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

#[test]
fn fallback_is_populated() {
    let fallback = messages(EN_US, "en-US");
    assert!(fallback.len() > 10, "fallback has only {} messages", fallback.len());
    assert_eq!(
        fallback.get("snoring-count"),
        Some(&BTreeSet::from(["count".to_string()]))
    );
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback = messages(EN_US, "en-US");
    let mut failures = Vec::new();

    for (locale, src) in LOCALES {
        let translated = messages(src, locale);
        let missing: Vec<_> = fallback
            .keys()
            .filter(|id| !translated.contains_key(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing:\n  {}", missing.join("\n  ")));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n\n{}",
        failures.join("\n\n")
    );
}

#[test]
fn placeables_match_fallback() {
    let fallback = messages(EN_US, "en-US");

    for (locale, src) in LOCALES {
        for (id, vars) in messages(src, locale) {
            if let Some(expected) = fallback.get(&id) {
                assert_eq!(
                    &vars, expected,
                    "{locale}: message `{id}` uses different variables than en-US"
                );
            }
        }
    }
}

#[test]
fn quality_caption_presents_the_score_as_a_sample() {
    let caption = EN_US
        .lines()
        .find_map(|line| line.strip_prefix("quality-caption ="))
        .expect("quality-caption defined")
        .trim();
    assert!(caption.starts_with("Sample"), "caption was {caption:?}");
    assert!(!caption.contains("recent nights"));
}

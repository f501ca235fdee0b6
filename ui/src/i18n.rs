//! Localized strings for the Sleepwell UI.
//!
//! Messages live in `i18n/<locale>/sleepwell-ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback; `zh-CN` is also shipped. Look up
//! through [`t!`](crate::t) after [`init`] has run once at launch.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `fl!` against the shared [`LOADER`].
///
/// ```ignore
/// t!("app-title");
/// t!("snoring-count", count = 3);
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// FTL file stem shared by every locale.
const DOMAIN: &str = "sleepwell-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("static language tag");
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    // Counts are spliced into toast text; no bidi isolation marks.
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Pick the best embedded locale for the OS or browser. Runs once.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => tracing::debug!(?selected, "locale selected"),
            Err(err) => tracing::warn!(%err, "locale selection failed, using en-US"),
        }
    });
}

/// Switch locale from the navbar. Unparseable tags leave the locale as is.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable locale tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Language tag currently used for lookups.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded locale tags, sorted.
pub fn available_languages() -> Vec<String> {
    Localizations::iter()
        .filter_map(|path| path.split_once('/').map(|(locale, _)| locale.to_string()))
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

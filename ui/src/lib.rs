//! Shared UI crate for Sleepwell. Sleep math, snoring detection and views live here;
//! the platform crates only launch and route.

pub mod core;
pub mod i18n;
pub mod sleep;
pub mod snoring;
pub mod views;

pub mod components {
    // Localized application header (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;

    pub mod sleep_card;
    pub use sleep_card::SleepCard;

    pub mod toasts;
    pub use toasts::{post_notice, Toasts};
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}

//! Shared UI crate for the Malawi vacancies dashboard. Chart building, the
//! export pipeline and every view live here; `web` and `desktop` only launch.

pub mod charts;
pub mod core;
pub mod dashboard;
pub mod export;
pub mod notifications;
pub mod views;

pub mod components {
    // Section navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}

use dioxus::prelude::manganis;

/// Shared theme stylesheet. The web build links it; desktop embeds the same file.
pub const THEME_CSS: dioxus::prelude::Asset = dioxus::prelude::asset!("/assets/theme/main.css");
